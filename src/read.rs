use crate::data::{Employee, Error, SkipReason, SkippedRow};
use encoding_rs::WINDOWS_1251;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::Path;
use tracing::warn;

/// Columns every input file must carry, matched case-sensitively.
/// Anything else in the header is ignored.
pub(crate) const REQUIRED_COLUMNS: [&str; 7] = [
    "name",
    "position",
    "completed_tasks",
    "performance",
    "skills",
    "team",
    "experience_years",
];

/// What `load_employees` hands back: the rows that made it, plus a
/// structured account of the rows that didn't.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct LoadOutcome {
    pub employees: Vec<Employee>,
    pub skipped: Vec<SkippedRow>,
}

/// A CSV row before numeric coercion. Everything comes in as text so a bad
/// number only costs us that row, not the whole file.
#[derive(Debug, Deserialize)]
struct RawRow {
    name: String,
    position: String,
    completed_tasks: String,
    performance: String,
    skills: String,
    team: String,
    experience_years: String,
}

impl RawRow {
    fn coerce(self) -> Result<Employee, SkipReason> {
        Ok(Employee {
            completed_tasks: parse_count("completed_tasks", &self.completed_tasks)?,
            performance: parse_score("performance", &self.performance)?,
            experience_years: parse_count("experience_years", &self.experience_years)?,
            name: self.name,
            position: self.position,
            skills: self.skills,
            team: self.team,
        })
    }
}

fn parse_count(column: &'static str, value: &str) -> Result<u32, SkipReason> {
    value.parse().map_err(|_| SkipReason::BadInteger {
        column,
        value: value.to_string(),
    })
}

fn parse_score(column: &'static str, value: &str) -> Result<f64, SkipReason> {
    value.parse().map_err(|_| SkipReason::BadNumber {
        column,
        value: value.to_string(),
    })
}

/// Loads one CSV file of employee records. Structural problems (unreadable,
/// empty, wrong header) are fatal for the file; bad individual rows are
/// skipped with a warning and reported in the outcome.
pub(crate) fn load_employees(path: &Path) -> Result<LoadOutcome, anyhow::Error> {
    use anyhow::Context;
    let bytes =
        std::fs::read(path).with_context(|| format!("could not read {}", path.display()))?;
    let text = decode(&bytes, path)?;
    Ok(parse_records(&text, path)?)
}

/// Two-attempt decode: UTF-8 first, then Windows-1251 for legacy exports.
/// Windows-1251 covers every byte except one hole, so a genuine failure of
/// both means the file isn't text we know how to read.
fn decode<'a>(bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>, Error> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }
    let (text, _, had_errors) = WINDOWS_1251.decode(bytes);
    if had_errors {
        return Err(Error::Undecodable(path.to_path_buf()));
    }
    Ok(text)
}

/// Parses decoded CSV text: validates the header, then collects rows,
/// skipping the ones that fail coercion.
fn parse_records(text: &str, path: &Path) -> Result<LoadOutcome, Error> {
    if text.trim().is_empty() {
        return Err(Error::EmptyFile(path.to_path_buf()));
    }
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let headers = rdr
        .headers()
        .map_err(|_| Error::EmptyFile(path.to_path_buf()))?;

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingColumns {
            file: path.to_path_buf(),
            missing,
        });
    }

    let mut outcome = LoadOutcome::default();
    for (i, result) in rdr.deserialize::<RawRow>().enumerate() {
        let line = i + 1;
        let parsed = result
            .map_err(|e| SkipReason::Malformed(e.to_string()))
            .and_then(RawRow::coerce);
        match parsed {
            Ok(employee) => outcome.employees.push(employee),
            Err(reason) => {
                warn!("{}: row {line} skipped: {reason}", path.display());
                outcome.skipped.push(SkippedRow { line, reason });
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::{decode, load_employees, parse_records};
    use crate::data::{Employee, Error, SkipReason};
    use std::io::Write;
    use std::path::Path;

    fn path() -> &'static Path {
        Path::new("test.csv")
    }

    fn employee(name: &str, position: &str, performance: f64) -> Employee {
        Employee {
            name: name.to_string(),
            position: position.to_string(),
            completed_tasks: 10,
            performance,
            skills: "Rust".to_string(),
            team: "Core".to_string(),
            experience_years: 3,
        }
    }

    #[test]
    fn loads_one_record_per_row() {
        let csv = "\
name,position,completed_tasks,performance,skills,team,experience_years
Alice,Backend,10,4.8,Rust,Core,3
Bob,Frontend,10,4.5,Rust,Core,3
";
        let outcome = parse_records(csv, path()).unwrap();
        assert_eq!(
            outcome.employees,
            [employee("Alice", "Backend", 4.8), employee("Bob", "Frontend", 4.5)]
        );
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn trims_whitespace_and_ignores_extra_columns() {
        let csv = "\
name, position, completed_tasks, performance, skills, team, experience_years, office
  Alice ,  Backend , 10, 4.8, Rust, Core, 3, Berlin
";
        let outcome = parse_records(csv, path()).unwrap();
        assert_eq!(outcome.employees, [employee("Alice", "Backend", 4.8)]);
    }

    #[test]
    fn empty_file_is_a_format_error() {
        assert_eq!(
            parse_records("", path()),
            Err(Error::EmptyFile(path().to_path_buf()))
        );
        assert_eq!(
            parse_records("  \n ", path()),
            Err(Error::EmptyFile(path().to_path_buf()))
        );
    }

    #[test]
    fn missing_columns_are_named() {
        let csv = "name,position,completed_tasks,skills,team\nAlice,Backend,10,Rust,Core\n";
        assert_eq!(
            parse_records(csv, path()),
            Err(Error::MissingColumns {
                file: path().to_path_buf(),
                missing: vec!["performance".to_string(), "experience_years".to_string()],
            })
        );
    }

    #[test]
    fn column_match_is_case_sensitive() {
        let csv = "Name,position,completed_tasks,performance,skills,team,experience_years\n";
        assert_eq!(
            parse_records(csv, path()),
            Err(Error::MissingColumns {
                file: path().to_path_buf(),
                missing: vec!["name".to_string()],
            })
        );
    }

    #[test]
    fn header_only_file_loads_empty() {
        let csv = "name,position,completed_tasks,performance,skills,team,experience_years\n";
        let outcome = parse_records(csv, path()).unwrap();
        assert!(outcome.employees.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn bad_rows_are_skipped_with_reasons() {
        let csv = "\
name,position,completed_tasks,performance,skills,team,experience_years
Alice,Backend,10,4.8,Rust,Core,3
Bob,Backend,many,4.5,Rust,Core,3
Carol,Backend,10,high,Rust,Core,3
Dave,Backend,10,4.6,Rust,Core,-1
Erin,Backend,10,4.7,Rust,Core,2
";
        let outcome = parse_records(csv, path()).unwrap();
        assert_eq!(outcome.employees.len(), 2);
        assert_eq!(outcome.employees[0].name, "Alice");
        assert_eq!(outcome.employees[1].name, "Erin");
        let reasons: Vec<_> = outcome
            .skipped
            .iter()
            .map(|s| (s.line, s.reason.clone()))
            .collect();
        assert_eq!(
            reasons,
            [
                (
                    2,
                    SkipReason::BadInteger {
                        column: "completed_tasks",
                        value: "many".to_string()
                    }
                ),
                (
                    3,
                    SkipReason::BadNumber {
                        column: "performance",
                        value: "high".to_string()
                    }
                ),
                (
                    4,
                    SkipReason::BadInteger {
                        column: "experience_years",
                        value: "-1".to_string()
                    }
                ),
            ]
        );
    }

    #[test]
    fn short_row_is_skipped_not_fatal() {
        let csv = "\
name,position,completed_tasks,performance,skills,team,experience_years
Alice,Backend,10
Bob,Frontend,10,4.5,Rust,Core,3
";
        let outcome = parse_records(csv, path()).unwrap();
        assert_eq!(outcome.employees, [employee("Bob", "Frontend", 4.5)]);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].line, 1);
        assert!(matches!(outcome.skipped[0].reason, SkipReason::Malformed(_)));
    }

    #[test]
    fn decodes_cp1251_when_utf8_fails() {
        // "Анна" in Windows-1251.
        let mut bytes =
            b"name,position,completed_tasks,performance,skills,team,experience_years\n".to_vec();
        bytes.extend_from_slice(&[0xC0, 0xED, 0xED, 0xE0]);
        bytes.extend_from_slice(b",Backend,10,4.8,Rust,Core,3\n");
        let text = decode(&bytes, path()).unwrap();
        let outcome = parse_records(&text, path()).unwrap();
        assert_eq!(outcome.employees[0].name, "Анна");
    }

    #[test]
    fn undecodable_bytes_are_a_format_error() {
        // 0xFF rules out UTF-8; 0x98 is the hole in Windows-1251.
        let bytes = [0xFF, 0x98];
        assert_eq!(
            decode(&bytes, path()),
            Err(Error::Undecodable(path().to_path_buf()))
        );
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "name,position,completed_tasks,performance,skills,team,experience_years\n\
             Alice,Backend,10,4.8,Rust,Core,3\n"
        )
        .unwrap();
        let outcome = load_employees(file.path()).unwrap();
        assert_eq!(outcome.employees, [employee("Alice", "Backend", 4.8)]);
    }
}
