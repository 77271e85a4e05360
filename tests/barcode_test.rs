//! EAN-13 条码性质测试

use food_keeper::{check_digit, is_valid, normalize, BarcodeError, Digit12};

/// 生成一批确定性的 12 位数字串
fn sample_bodies() -> Vec<String> {
    let mut seed: u64 = 0x5eed_f00d;
    let mut bodies = vec!["000000000000".to_string(), "999999999999".to_string()];
    for _ in 0..500 {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        bodies.push(format!("{:012}", (seed >> 16) % 1_000_000_000_000));
    }
    bodies
}

#[test]
fn test_check_digit_is_single_deterministic_digit() {
    for body in sample_bodies() {
        let first = check_digit(&body).unwrap();
        assert!(first <= 9, "{body}");
        assert_eq!(check_digit(&body).unwrap(), first, "{body}");
    }
}

#[test]
fn test_body_plus_check_digit_is_valid() {
    for body in sample_bodies() {
        let code = format!("{}{}", body, check_digit(&body).unwrap());
        assert!(is_valid(&code), "{code}");
    }
}

#[test]
fn test_wrong_check_digit_is_invalid() {
    for body in sample_bodies() {
        let right = check_digit(&body).unwrap();
        for wrong in (0..=9u8).filter(|d| *d != right) {
            assert!(!is_valid(&format!("{body}{wrong}")), "{body}{wrong}");
        }
    }
}

#[test]
fn test_normalize_is_idempotent() {
    for body in sample_bodies() {
        let once = normalize(&body).unwrap();
        let twice = normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);

        // 校验位错误的 13 位码同样原样返回
        let corrupt = format!("{body}{}", (check_digit(&body).unwrap() + 1) % 10);
        let normalized = normalize(&corrupt).unwrap();
        assert_eq!(normalized.as_str(), corrupt);
        assert_eq!(normalize(normalized.as_str()).unwrap(), normalized);
    }
}

#[test]
fn test_check_digit_rejects_malformed_input() {
    for bad in ["12345678901a", "12345678901", "1234567890123", "", "1234 5678901", "-12345678901"] {
        assert!(
            matches!(check_digit(bad), Err(BarcodeError::InvalidInput { .. })),
            "{bad:?}"
        );
    }
}

#[test]
fn test_known_vectors() {
    assert_eq!(check_digit("400638133393").unwrap(), 1);
    assert!(is_valid("4006381333931"));
    assert!(!is_valid("4006381333930"));
    assert_eq!(normalize("400638133393").unwrap().as_str(), "4006381333931");
}

#[test]
fn test_digit12_newtype_matches_free_function() {
    let body: Digit12 = "400638133393".parse().unwrap();
    assert_eq!(body.check_digit(), 1);
    assert_eq!(body.with_check_digit().to_string(), "4006381333931");
}
