/// 每次請求查詢的准考證號數量
pub const BATCH_SIZE: usize = 5;

/// 從 `start` 開始往後產生連續的准考證號，保留原本的位數 (前導零)。
/// 超出位數的號碼直接略過，不會繞回 0。
pub fn registration_batch(start: &str, size: usize) -> Vec<String> {
    let width = start.len();
    let Ok(first) = start.parse::<u64>() else {
        return Vec::new();
    };

    (0..size as u64)
        .filter_map(|offset| first.checked_add(offset))
        .map(|n| format!("{:0width$}", n, width = width))
        .take_while(|reg_no| reg_no.len() == width)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consecutive_window() {
        let batch = registration_batch("22105110001", BATCH_SIZE);
        assert_eq!(
            batch,
            vec![
                "22105110001",
                "22105110002",
                "22105110003",
                "22105110004",
                "22105110005"
            ]
        );
    }

    #[test]
    fn test_carries_across_serial_digits() {
        let batch = registration_batch("22105110998", 4);
        assert_eq!(
            batch,
            vec!["22105110998", "22105110999", "22105111000", "22105111001"]
        );
    }

    #[test]
    fn test_leading_zeros_are_kept() {
        let batch = registration_batch("00000000009", 2);
        assert_eq!(batch, vec!["00000000009", "00000000010"]);
    }

    #[test]
    fn test_window_shrinks_at_width_overflow() {
        let batch = registration_batch("99999999998", BATCH_SIZE);
        assert_eq!(batch, vec!["99999999998", "99999999999"]);
    }

    #[test]
    fn test_non_numeric_start_yields_nothing() {
        assert!(registration_batch("abc", BATCH_SIZE).is_empty());
        assert!(registration_batch("", BATCH_SIZE).is_empty());
    }
}
