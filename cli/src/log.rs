use colored::Colorize;

/// Prints a bold, prominent title for major sections of output.
pub fn print_title(text: &str) {
    println!("{}", format!("\n{}", text).bold());
}

pub fn print_info(text: &str) {
    println!("{}", text);
}

pub fn print_divider() {
    println!();
}

/// Prints a highlighted section header with yellow bold text and surrounding markers.
pub fn print_section_header(text: &str) {
    println!("{}", format!("\n=== {} ===", text).yellow().bold());
}

pub fn print_message(text: &str) {
    println!("{}", format!("→ {}", text).cyan());
}

/// Quantities: rewards, balances, proof counts.
pub fn print_count(text: &str) {
    println!("{}", format!("⟐ {}", text).blue());
}

pub fn print_error(text: &str) {
    println!("{}", format!("✗ {}", text).red());
}

/// Set up `env_logger` for the client's diagnostics. `RUST_LOG` wins over `--verbose`.
pub fn init_logger(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_millis()
        .try_init();
}

/// Render a raw token amount with the mint's decimals.
pub fn format_amount(amount: u64, decimals: u64) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let digits = format!("{:0>width$}", amount, width = decimals as usize + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals as usize);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(500, 0), "500");
        assert_eq!(format_amount(1_500_000, 6), "1.5");
        assert_eq!(format_amount(42, 6), "0.000042");
        assert_eq!(format_amount(3_000_000_000, 9), "3");
        assert_eq!(format_amount(0, 9), "0");
    }
}
