/// Extract a numeric pay amount from free text
///
/// Takes the first run of digits and commas, ignoring any currency symbol
/// or label around it. The run ends at the first other character, so a
/// decimal fraction is not part of the amount. Text without digits parses as 0.
///
/// ```
/// use moonlight_jobs::core::parse_pay;
///
/// assert_eq!(parse_pay("₱1,500/hr"), 1500.0);
/// assert_eq!(parse_pay("Negotiable"), 0.0);
/// ```
pub fn parse_pay(text: &str) -> f64 {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return 0.0;
    };

    let number: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();

    match number.parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => 0.0,
    }
}
