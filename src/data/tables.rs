pub const ENTRY_TABLE: &str = "CREATE TABLE IF NOT EXISTS aq_entry (
                                id SERIAL PRIMARY KEY,
                                seconds_since_last_reset INTEGER NOT NULL,
                                firmware TEXT NOT NULL
                            );";

pub const ENTRY_VALUE_TABLE: &str = "CREATE TABLE IF NOT EXISTS aq_entry_value (
                                entry_id INTEGER NOT NULL REFERENCES aq_entry(id),
                                value_id INTEGER NOT NULL,
                                value TEXT
                            );";
