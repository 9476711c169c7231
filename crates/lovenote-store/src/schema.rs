//! Response store database schema.

/// SQL to create the responses table.
pub const CREATE_RESPONSES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS responses (
    id         SERIAL PRIMARY KEY,
    accepted   BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

#[cfg(test)]
mod tests {
    use super::*;

    const MIGRATION: &str = include_str!("../../../migrations/0001_create_responses.sql");

    fn normalize(sql: &str) -> String {
        sql.lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .flat_map(str::split_whitespace)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_schema_matches_migration() {
        assert_eq!(normalize(CREATE_RESPONSES_TABLE), normalize(MIGRATION));
    }
}
