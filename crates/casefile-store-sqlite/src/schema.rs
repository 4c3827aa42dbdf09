//! SQL schema for the Casefile SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.
//!
//! Every enumerated column carries a CHECK constraint mirroring its
//! `Domain` in `casefile-core`. Timestamps are RFC 3339 UTC strings with
//! millisecond precision; calendar dates are `YYYY-MM-DD`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS accounts (
    id            TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

-- One profile per account; the primary key is the account id.
CREATE TABLE IF NOT EXISTS profiles (
    id          TEXT PRIMARY KEY REFERENCES accounts(id) ON DELETE CASCADE,
    full_name   TEXT NOT NULL,
    role        TEXT NOT NULL DEFAULT 'investigator',
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS officers (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL CHECK (trim(name) <> ''),
    rank          TEXT NOT NULL CHECK (trim(rank) <> ''),
    badge_number  TEXT,            -- unique in practice, not enforced
    email         TEXT,
    phone         TEXT,
    user_id       TEXT NOT NULL REFERENCES accounts(id),
    created_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at    TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS cases (
    id              TEXT PRIMARY KEY,
    case_number     TEXT NOT NULL CHECK (trim(case_number) <> ''),
    title           TEXT NOT NULL CHECK (trim(title) <> ''),
    description     TEXT,
    status          TEXT NOT NULL DEFAULT 'open'
                    CHECK (status IN ('open', 'closed', 'pending', 'under_investigation')),
    priority        TEXT NOT NULL DEFAULT 'medium'
                    CHECK (priority IN ('low', 'medium', 'high', 'critical')),
    date_opened     TEXT NOT NULL DEFAULT (date('now')),
    date_closed     TEXT,
    location        TEXT,
    lead_officer_id TEXT REFERENCES officers(id) ON DELETE SET NULL,
    user_id         TEXT NOT NULL REFERENCES accounts(id),
    created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    CHECK (date_closed IS NULL OR date_closed >= date_opened)
);

CREATE TABLE IF NOT EXISTS suspects (
    id          TEXT PRIMARY KEY,
    case_id     TEXT NOT NULL REFERENCES cases(id) ON DELETE CASCADE,
    name        TEXT NOT NULL CHECK (trim(name) <> ''),
    age         INTEGER CHECK (age IS NULL OR age BETWEEN 0 AND 150),
    gender      TEXT,
    address     TEXT,
    phone       TEXT,
    description TEXT,
    status      TEXT NOT NULL DEFAULT 'suspect'
                CHECK (status IN ('suspect', 'person_of_interest', 'cleared', 'arrested')),
    user_id     TEXT NOT NULL REFERENCES accounts(id),
    created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS evidence (
    id               TEXT PRIMARY KEY,
    case_id          TEXT NOT NULL REFERENCES cases(id) ON DELETE CASCADE,
    evidence_number  TEXT NOT NULL CHECK (trim(evidence_number) <> ''),
    description      TEXT NOT NULL CHECK (trim(description) <> ''),
    evidence_type    TEXT NOT NULL
                     CHECK (evidence_type IN ('physical', 'digital', 'documentary',
                                              'testimonial', 'biological', 'trace')),
    location_found   TEXT,
    date_collected   TEXT,
    collected_by     TEXT,
    chain_of_custody TEXT,            -- free text, not modelled further
    storage_location TEXT,
    status           TEXT NOT NULL DEFAULT 'in_storage'
                     CHECK (status IN ('in_storage', 'in_lab', 'released', 'disposed')),
    user_id          TEXT NOT NULL REFERENCES accounts(id),
    created_at       TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at       TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);

CREATE TABLE IF NOT EXISTS lab_reports (
    id              TEXT PRIMARY KEY,
    evidence_id     TEXT NOT NULL REFERENCES evidence(id) ON DELETE CASCADE,
    report_number   TEXT NOT NULL CHECK (trim(report_number) <> ''),
    analysis_type   TEXT NOT NULL CHECK (trim(analysis_type) <> ''),
    analysis_result TEXT,
    technician_name TEXT,
    lab_name        TEXT,
    date_submitted  TEXT NOT NULL DEFAULT (date('now')),
    date_completed  TEXT,
    status          TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'in_progress', 'completed', 'inconclusive')),
    notes           TEXT,
    user_id         TEXT NOT NULL REFERENCES accounts(id),
    created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    updated_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
    CHECK (date_completed IS NULL OR date_completed >= date_submitted)
);

CREATE INDEX IF NOT EXISTS cases_lead_officer_idx ON cases(lead_officer_id);
CREATE INDEX IF NOT EXISTS suspects_case_idx      ON suspects(case_id);
CREATE INDEX IF NOT EXISTS evidence_case_idx      ON evidence(case_id);
CREATE INDEX IF NOT EXISTS lab_reports_evidence_idx ON lab_reports(evidence_id);

-- Refresh updated_at on every mutation. recursive_triggers is off, so the
-- inner UPDATE does not fire the trigger again.
CREATE TRIGGER IF NOT EXISTS accounts_touch AFTER UPDATE ON accounts FOR EACH ROW
BEGIN
    UPDATE accounts SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS profiles_touch AFTER UPDATE ON profiles FOR EACH ROW
BEGIN
    UPDATE profiles SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS officers_touch AFTER UPDATE ON officers FOR EACH ROW
BEGIN
    UPDATE officers SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS cases_touch AFTER UPDATE ON cases FOR EACH ROW
BEGIN
    UPDATE cases SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS suspects_touch AFTER UPDATE ON suspects FOR EACH ROW
BEGIN
    UPDATE suspects SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS evidence_touch AFTER UPDATE ON evidence FOR EACH ROW
BEGIN
    UPDATE evidence SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

CREATE TRIGGER IF NOT EXISTS lab_reports_touch AFTER UPDATE ON lab_reports FOR EACH ROW
BEGIN
    UPDATE lab_reports SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') WHERE id = NEW.id;
END;

PRAGMA user_version = 1;
";
