use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w.+-]+@([\w-]+\.)+[a-zA-Z]{2,}$").expect("email pattern is valid")
});

pub fn is_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("jane@example.com", true)]
    #[case("first.last+tag@mail.example.io", true)]
    #[case("someone@studio.design", true)]
    #[case("no-at-sign.example.com", false)]
    #[case("missing@tld", false)]
    #[case("", false)]
    fn recognises_email_addresses(#[case] email: &str, #[case] expected: bool) {
        assert_eq!(is_email(email), expected);
    }
}
