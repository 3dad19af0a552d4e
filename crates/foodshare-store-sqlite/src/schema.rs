//! Bootstrap DDL for the four donation tables.
//!
//! Production databases are created and populated externally; this schema is
//! applied only on request (`SqliteStore::bootstrap`) and for in-memory
//! stores. It mirrors the columns the dashboard reads.

/// Idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS providers (
    provider_id INTEGER PRIMARY KEY,
    name        TEXT,
    type        TEXT,
    address     TEXT,
    city        TEXT,
    contact     TEXT
);

CREATE TABLE IF NOT EXISTS receivers (
    receiver_id INTEGER PRIMARY KEY,
    name        TEXT,
    type        TEXT,
    city        TEXT,
    contact     TEXT
);

CREATE TABLE IF NOT EXISTS food_listings (
    food_id       INTEGER PRIMARY KEY,
    food_name     TEXT,
    quantity      INTEGER,
    expiry_date   TEXT,
    provider_id   INTEGER,
    provider_type TEXT,
    location      TEXT,
    food_type     TEXT,
    meal_type     TEXT
);

-- No foreign keys: claims may reference listings or receivers that do not
-- exist.
CREATE TABLE IF NOT EXISTS claims (
    claim_id    INTEGER PRIMARY KEY,
    food_id     INTEGER,
    receiver_id INTEGER,
    status      TEXT,
    timestamp   TEXT
);
";
