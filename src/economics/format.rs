use super::SATOSHIS_PER_COIN;

/// Satoshis as a coin amount with trailing zeros trimmed, e.g. `"0.0000125 BSV"`.
pub fn format_satoshis(satoshis: f64) -> String {
    let fixed = format!("{:.8}", satoshis / SATOSHIS_PER_COIN);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} BSV")
}

/// USD with extra precision for sub-cent amounts.
pub fn format_usd(value: f64) -> String {
    if value < 0.01 {
        format!("${value:.6}")
    } else {
        format!("${value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn satoshis_trim_zeros() {
        assert_eq!(format_satoshis(1250.0), "0.0000125 BSV");
        assert_eq!(format_satoshis(100_000_000.0), "1 BSV");
        assert_eq!(format_satoshis(0.0), "0 BSV");
    }

    #[test]
    fn usd_precision() {
        assert_eq!(format_usd(0.00005), "$0.000050");
        assert_eq!(format_usd(8.5), "$8.50");
    }
}
