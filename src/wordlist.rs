// Wordlist loading for wordfuzz

use std::fs;
use std::path::Path;

use crate::error::FuzzError;
use crate::models::Job;

/// Read one word per line, trimmed, skipping blank lines.
pub fn load_wordlist(path: impl AsRef<Path>) -> Result<Vec<Job>, FuzzError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| FuzzError::Wordlist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_wordlist(&text))
}

pub fn parse_wordlist(text: &str) -> Vec<Job> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trims_and_skips_blank_lines() {
        let words = parse_wordlist("admin\n\n  login \r\n\t\nadmin\nzzz");
        assert_eq!(words, vec!["admin", "login", "admin", "zzz"]);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "one\n\ntwo").unwrap();
        let words = load_wordlist(file.path()).unwrap();
        assert_eq!(words, vec!["one", "two"]);
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let err = load_wordlist(&missing).unwrap_err();
        assert!(matches!(err, FuzzError::Wordlist { .. }));
        assert!(err.to_string().starts_with("Error reading wordlist"));
    }

    #[test]
    fn invalid_utf8_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x61, 0xff, 0xfe, 0x0a]).unwrap();
        assert!(load_wordlist(file.path()).is_err());
    }
}
