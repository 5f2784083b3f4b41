/// Mod-10 checksum of a TLE line: digits count at face value, `-` counts as 1.
pub fn checksum(line: &str) -> u8 {
    let sum: u32 = line
        .bytes()
        .map(|b| match b {
            b'0'..=b'9' => u32::from(b - b'0'),
            b'-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Checks the trailing digit of a complete line against the preceding columns.
pub fn verify(line: &str) -> bool {
    let Some((body, last)) = line.len().checked_sub(1).map(|i| line.split_at(i)) else {
        return false;
    };
    match last.bytes().next() {
        Some(d @ b'0'..=b'9') => checksum(body) == d - b'0',
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn matches_published_iss_checksums() {
        assert_eq!(checksum(&ISS_LINE1[..68]), 7);
        assert_eq!(checksum(&ISS_LINE2[..68]), 7);
        assert!(verify(ISS_LINE1));
        assert!(verify(ISS_LINE2));
    }

    #[test]
    fn minus_signs_count_as_one() {
        assert_eq!(checksum("---"), 3);
        assert_eq!(checksum("1-2-3"), 8);
        assert_eq!(checksum("+ . U"), 0);
    }

    #[test]
    fn always_a_single_digit_and_stable() {
        for line in [ISS_LINE1, ISS_LINE2, "", "9999999999", "abc-def"] {
            let first = checksum(line);
            assert!(first <= 9);
            assert_eq!(first, checksum(line));
        }
    }

    #[test]
    fn verify_rejects_bad_trailing_digit() {
        let mut corrupted = ISS_LINE1[..68].to_string();
        corrupted.push('3');
        assert!(!verify(&corrupted));
        assert!(!verify(""));
        assert!(!verify("1 25544U x"));
    }
}
