//! §6 "Persistence format": a gzip-compressed UTF-8 text dump.
//!
//! Three header lines (`base`, `check`, alphabet) followed by one key per
//! line. The format carries no version tag — a known limitation — but is
//! kept unextended, since persistence is an external interface whose
//! on-disk shape must not change gratuitously.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::debug;

use crate::alphabet::Alphabet;
use crate::error::TrieError;
use crate::keys::KeyTable;

#[cfg(unix)]
const DUMP_MODE: u32 = 0o744;

fn int_list(values: &[i32]) -> String {
    values
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_int_list(line: &str) -> Result<Vec<i32>, TrieError> {
    if line.is_empty() {
        return Ok(Vec::new());
    }
    line.split(',')
        .map(|field| {
            field
                .parse::<i32>()
                .map_err(|_| TrieError::format(format!("not an integer: {field:?}")))
        })
        .collect()
}

fn alphabet_line(alphabet: &Alphabet) -> String {
    let mut pairs: Vec<(char, i32)> = alphabet.iter().collect();
    pairs.sort_by_key(|&(_, code)| code);
    let mut line = String::new();
    for (c, code) in pairs {
        line.push(c);
        line.push('=');
        line.push_str(&code.to_string());
        line.push(';');
    }
    line
}

fn parse_alphabet_line(line: &str) -> Result<Alphabet, TrieError> {
    let mut pairs = Vec::new();
    for pair in line.split(';').filter(|p| !p.is_empty()) {
        let (c_str, code_str) = pair
            .split_once('=')
            .ok_or_else(|| TrieError::format(format!("malformed alphabet pair: {pair:?}")))?;
        let c = {
            let mut chars = c_str.chars();
            let c = chars
                .next()
                .ok_or_else(|| TrieError::format("empty alphabet code point"))?;
            if chars.next().is_some() {
                return Err(TrieError::format(format!(
                    "alphabet entry {c_str:?} is not a single code point"
                )));
            }
            c
        };
        let code = code_str
            .parse::<i32>()
            .map_err(|_| TrieError::format(format!("not an integer: {code_str:?}")))?;
        pairs.push((c, code));
    }
    Ok(Alphabet::from_pairs(pairs))
}

/// Writes `(base, check, alphabet, keys)` to `path` as a gzip-wrapped text
/// stream, per §6. Creates the file with mode `0744` on unix; other
/// platforms fall back to the default `create` permissions.
pub(crate) fn dump(
    path: &Path,
    base: &[i32],
    check: &[i32],
    alphabet: &Alphabet,
    keys: &KeyTable,
) -> Result<(), TrieError> {
    let file = File::create(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(DUMP_MODE))?;
    }

    let mut encoder = GzEncoder::new(file, Compression::default());
    writeln!(encoder, "{}", int_list(base))?;
    writeln!(encoder, "{}", int_list(check))?;
    writeln!(encoder, "{}", alphabet_line(alphabet))?;

    let key_slice = keys.as_slice();
    for (i, key) in key_slice.iter().enumerate() {
        if i + 1 == key_slice.len() {
            write!(encoder, "{key}")?;
        } else {
            writeln!(encoder, "{key}")?;
        }
    }
    encoder.finish()?;
    debug!(path = %path.display(), key_count = key_slice.len(), "dumped trie");
    Ok(())
}

/// Reads a dump produced by [`dump`] back into its raw components.
/// Malformed integers or a missing header line raise [`TrieError::Format`]
/// rather than silently coercing to zero (§9 resolves this source quirk).
pub(crate) fn load(path: &Path) -> Result<(Vec<i32>, Vec<i32>, Alphabet, KeyTable), TrieError> {
    let file = File::open(path)?;
    let mut decoder = BufReader::new(GzDecoder::new(file));

    let mut base_line = String::new();
    let mut check_line = String::new();
    let mut alphabet_line_buf = String::new();
    decoder.read_line(&mut base_line)?;
    decoder.read_line(&mut check_line)?;
    decoder.read_line(&mut alphabet_line_buf)?;

    if base_line.is_empty() || check_line.is_empty() || alphabet_line_buf.is_empty() {
        return Err(TrieError::format("dump is missing a header line"));
    }

    let base = parse_int_list(base_line.trim_end_matches('\n'))?;
    let check = parse_int_list(check_line.trim_end_matches('\n'))?;
    let alphabet = parse_alphabet_line(alphabet_line_buf.trim_end_matches('\n'))?;

    let mut sorted = Vec::new();
    for line in decoder.lines() {
        sorted.push(line?);
    }

    debug!(path = %path.display(), key_count = sorted.len(), "loaded trie");
    Ok((base, check, alphabet, KeyTable::from_sorted(sorted)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_list_round_trips() {
        let values = vec![3, -1, 0, 16];
        let line = int_list(&values);
        assert_eq!(line, "3,-1,0,16");
        assert_eq!(parse_int_list(&line).unwrap(), values);
    }

    #[test]
    fn parse_int_list_rejects_garbage() {
        assert!(parse_int_list("3,x,4").is_err());
    }

    #[test]
    fn alphabet_line_round_trips() {
        let a = Alphabet::build(&["bca"]);
        let line = alphabet_line(&a);
        let parsed = parse_alphabet_line(&line).unwrap();
        assert_eq!(parsed.code('a'), a.code('a'));
        assert_eq!(parsed.code('b'), a.code('b'));
        assert_eq!(parsed.code('c'), a.code('c'));
    }

    #[test]
    fn dump_and_load_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("dat-trie-test-{}.gz", std::process::id()));

        let keys = KeyTable::build(&["ac", "ad", "bf"]);
        let alphabet = Alphabet::build(&["ac", "ad", "bf"]);
        let base = vec![3, 7, -1, -2, 4, -3];
        let check = vec![1, 1, 3, 3, 1, 4];

        dump(&path, &base, &check, &alphabet, &keys).unwrap();
        let (loaded_base, loaded_check, loaded_alphabet, loaded_keys) = load(&path).unwrap();

        assert_eq!(loaded_base, base);
        assert_eq!(loaded_check, check);
        assert_eq!(loaded_alphabet.code('a'), alphabet.code('a'));
        assert_eq!(loaded_keys.as_slice(), keys.as_slice());

        fs::remove_file(&path).ok();
    }

    #[test]
    fn load_rejects_truncated_header() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("dat-trie-test-truncated-{}.gz", std::process::id()));
        {
            let file = File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            writeln!(encoder, "1,2,3").unwrap();
            encoder.finish().unwrap();
        }
        assert!(load(&path).is_err());
        fs::remove_file(&path).ok();
    }
}
