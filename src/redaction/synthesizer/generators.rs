//! Built-in value generators
//!
//! One generator per taxonomy category. Each carries a fixed sample value
//! used by the `static` strategy, so replacements stay readable even when no
//! randomness is wanted.

use super::ValueGenerator;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Utc};
use fake::faker::address::en::{
    BuildingNumber, CityName, CountryName, PostCode, StateAbbr, StateName, StreetName,
};
use fake::faker::company::en::{CompanyName, Profession};
use fake::faker::creditcard::en::CreditCardNumber;
use fake::faker::filesystem::en::FileName;
use fake::faker::internet::en::{Password, SafeEmail};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::number::en::NumberWithFormat;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Portuguese",
    "Italian",
    "Mandarin",
    "Japanese",
    "Korean",
    "Arabic",
    "Hindi",
    "Russian",
    "Polish",
    "Dutch",
    "Swedish",
];

/// Shape of a generated value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// "Jane Doe"
    FullName,
    /// "Jane"
    GivenName,
    /// "Doe"
    FamilyName,
    /// A full name behind a title, "Dr. Jane Doe"
    TitledName(&'static str),
    /// A safe example-domain address
    Email,
    /// A national-format phone number
    Phone,
    /// A random password of 10 to 16 characters
    Password,
    /// "report.pdf"
    FileName,
    /// A company name
    Company,
    /// A company name followed by a suffix word, "Acme Hospital"
    CompanyWith(&'static str),
    /// A job title
    Occupation,
    /// "742 Evergreen Terrace"
    StreetAddress,
    /// Street, city, state and ZIP on one line
    FullAddress,
    /// A city name
    City,
    /// "<city> County"
    County,
    /// A state name
    State,
    /// A country name
    Country,
    /// A postal code
    PostCode,
    /// Digits following a pattern (`#` any digit, `^` non-zero digit)
    Digits(&'static str),
    /// A fixed prefix followed by a digit pattern, "POL-12345678"
    Prefixed(&'static str, &'static str),
    /// An upper-case letter followed by eight digits
    Passport,
    /// An integer in an inclusive range
    IntRange(u32, u32),
    /// ISO date within the last few years, "2024-03-15"
    CalendarDate,
    /// US-style birth date, "07/21/1984"
    DateOfBirth,
    /// Two ISO dates, "2024-01-01 to 2024-06-30"
    DateInterval,
    /// "14:05:33"
    Time,
    /// "September"
    MonthName,
    /// A count and a unit, "12 weeks"
    Quantity {
        /// Smallest count
        min: u32,
        /// Largest count
        max: u32,
        /// Unit words to pick from
        units: &'static [&'static str],
    },
    /// Whole dollars with thousands separators, "$48,200"
    Money,
    /// A percentage, "7%"
    Rate,
    /// A card number
    CreditCard,
    /// A future expiry, "MM/YY"
    CardExpiry,
    /// One of a fixed list of words
    OneOf(&'static [&'static str]),
}

impl Generator {
    /// Produce a value of this shape
    pub fn produce(&self, rng: &mut dyn RngCore) -> String {
        match *self {
            Self::FullName => Name().fake_with_rng(rng),
            Self::GivenName => FirstName().fake_with_rng(rng),
            Self::FamilyName => LastName().fake_with_rng(rng),
            Self::TitledName(title) => {
                let name: String = Name().fake_with_rng(rng);
                format!("{title} {name}")
            }
            Self::Email => SafeEmail().fake_with_rng(rng),
            Self::Phone => PhoneNumber().fake_with_rng(rng),
            Self::Password => Password(10..17).fake_with_rng(rng),
            Self::FileName => FileName().fake_with_rng(rng),
            Self::Company => CompanyName().fake_with_rng(rng),
            Self::CompanyWith(suffix) => {
                let company: String = CompanyName().fake_with_rng(rng);
                format!("{company} {suffix}")
            }
            Self::Occupation => Profession().fake_with_rng(rng),
            Self::StreetAddress => street_address(rng),
            Self::FullAddress => {
                let street = street_address(rng);
                let city: String = CityName().fake_with_rng(rng);
                let state: String = StateAbbr().fake_with_rng(rng);
                let zip: String = PostCode().fake_with_rng(rng);
                format!("{street}, {city}, {state} {zip}")
            }
            Self::City => CityName().fake_with_rng(rng),
            Self::County => {
                let city: String = CityName().fake_with_rng(rng);
                format!("{city} County")
            }
            Self::State => StateName().fake_with_rng(rng),
            Self::Country => CountryName().fake_with_rng(rng),
            Self::PostCode => PostCode().fake_with_rng(rng),
            Self::Digits(pattern) => NumberWithFormat(pattern).fake_with_rng(rng),
            Self::Prefixed(prefix, pattern) => {
                let digits: String = NumberWithFormat(pattern).fake_with_rng(rng);
                format!("{prefix}{digits}")
            }
            Self::Passport => {
                let letter = char::from(rng.gen_range(b'A'..=b'Z'));
                let digits: String = NumberWithFormat("########").fake_with_rng(rng);
                format!("{letter}{digits}")
            }
            Self::IntRange(min, max) => rng.gen_range(min..=max).to_string(),
            Self::CalendarDate => recent_date(rng).format("%Y-%m-%d").to_string(),
            Self::DateOfBirth => random_date(rng, 1935, 2006)
                .format("%m/%d/%Y")
                .to_string(),
            Self::DateInterval => {
                let from = recent_date(rng);
                let to = from + Duration::days(rng.gen_range(1..=365));
                format!("{} to {}", from.format("%Y-%m-%d"), to.format("%Y-%m-%d"))
            }
            Self::Time => {
                let time = NaiveTime::from_hms_opt(
                    rng.gen_range(0..24),
                    rng.gen_range(0..60),
                    rng.gen_range(0..60),
                )
                .unwrap_or_default();
                time.format("%H:%M:%S").to_string()
            }
            Self::MonthName => random_date(rng, 2000, 2000).format("%B").to_string(),
            Self::Quantity { min, max, units } => {
                let count = rng.gen_range(min..=max);
                let unit = units.choose(rng).copied().unwrap_or("units");
                format!("{count} {unit}")
            }
            Self::Money => format!("${}", group_thousands(rng.gen_range(100..=100_000))),
            Self::Rate => format!("{}%", rng.gen_range(1..=100)),
            Self::CreditCard => CreditCardNumber().fake_with_rng(rng),
            Self::CardExpiry => {
                let this_year = Utc::now().year();
                random_date(rng, this_year + 1, this_year + 8)
                    .format("%m/%y")
                    .to_string()
            }
            Self::OneOf(choices) => choices.choose(rng).copied().unwrap_or_default().to_string(),
        }
    }
}

/// A built-in generator paired with its fixed sample value
#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    /// Value shape
    pub generator: Generator,
    /// Deterministic stand-in used by the static strategy
    pub sample: &'static str,
}

impl ValueGenerator for Builtin {
    fn generate(&self, rng: &mut dyn RngCore) -> String {
        self.generator.produce(rng)
    }

    fn sample(&self) -> Option<String> {
        Some(self.sample.to_string())
    }
}

const fn builtin(generator: Generator, sample: &'static str) -> Builtin {
    Builtin { generator, sample }
}

/// Generator table for every taxonomy category
pub const BUILTINS: &[(&str, Builtin)] = &[
    ("account number", builtin(Generator::Digits("#############"), "ACC1234567890")),
    ("accounts", builtin(Generator::Digits("#############"), "ACC1234567890")),
    ("address", builtin(Generator::FullAddress, "123 Main St, City, State 12345")),
    ("age", builtin(Generator::IntRange(18, 90), "35")),
    (
        "condition",
        builtin(
            Generator::OneOf(&["Hypertension", "Diabetes", "Asthma"]),
            "Medical Condition",
        ),
    ),
    ("confirmation number", builtin(Generator::Digits("########"), "CONF12345")),
    ("county", builtin(Generator::County, "Sample County")),
    ("credit card", builtin(Generator::CreditCard, "4111-1111-1111-1111")),
    ("credit card expiration", builtin(Generator::CardExpiry, "12/25")),
    ("cvv", builtin(Generator::Digits("###"), "123")),
    ("date", builtin(Generator::CalendarDate, "2024-01-01")),
    ("date interval", builtin(Generator::DateInterval, "2024-01-01 to 2024-12-31")),
    ("discharge date", builtin(Generator::CalendarDate, "2024-03-15")),
    ("dob", builtin(Generator::DateOfBirth, "01/01/1990")),
    (
        "duration",
        builtin(
            Generator::Quantity {
                min: 1,
                max: 100,
                units: &["days", "weeks", "months"],
            },
            "30 days",
        ),
    ),
    ("email address", builtin(Generator::Email, "user@example.com")),
    ("esidno", builtin(Generator::Digits("#############"), "ESI123456789")),
    ("filename", builtin(Generator::FileName, "document.pdf")),
    (
        "gender",
        builtin(Generator::OneOf(&["Male", "Female", "Non-binary"]), "Person"),
    ),
    ("language", builtin(Generator::OneOf(LANGUAGES), "English")),
    ("location", builtin(Generator::City, "City Name")),
    (
        "location address",
        builtin(Generator::FullAddress, "123 Main St, City, State 12345"),
    ),
    ("location address street", builtin(Generator::StreetAddress, "123 Main Street")),
    ("location city", builtin(Generator::City, "Anytown")),
    ("location country", builtin(Generator::Country, "United States")),
    ("location state", builtin(Generator::State, "California")),
    ("location zip", builtin(Generator::PostCode, "12345")),
    (
        "marital status",
        builtin(Generator::OneOf(&["Single", "Married", "Divorced"]), "Status"),
    ),
    (
        "medical process",
        builtin(
            Generator::OneOf(&["Surgery", "X-Ray", "MRI", "Blood Test"]),
            "Medical Procedure",
        ),
    ),
    ("money", builtin(Generator::Money, "$50,000")),
    ("month", builtin(Generator::MonthName, "January")),
    ("name", builtin(Generator::FullName, "John Doe")),
    ("name family", builtin(Generator::FamilyName, "Doe")),
    ("name given", builtin(Generator::GivenName, "John")),
    ("name medical professional", builtin(Generator::TitledName("Dr."), "Dr. Smith")),
    ("number", builtin(Generator::IntRange(1, 999_999), "12345")),
    ("numerical pii", builtin(Generator::Digits("#############"), "NUM123456")),
    ("occupation", builtin(Generator::Occupation, "Professional")),
    ("organization", builtin(Generator::Company, "Example Corp")),
    (
        "organization medical facility",
        builtin(Generator::CompanyWith("Hospital"), "General Hospital"),
    ),
    ("origin", builtin(Generator::Country, "Country")),
    ("passport number", builtin(Generator::Passport, "P12345678")),
    ("password", builtin(Generator::Password, "SecurePass123")),
    ("phone number", builtin(Generator::Phone, "(555) 123-4567")),
    (
        "physical attribute",
        builtin(Generator::OneOf(&["Tall", "Short", "Athletic"]), "Description"),
    ),
    ("pin", builtin(Generator::IntRange(1000, 9999), "1234")),
    (
        "planduration",
        builtin(
            Generator::Quantity {
                min: 1,
                max: 36,
                units: &["months"],
            },
            "12 months",
        ),
    ),
    ("policy number", builtin(Generator::Prefixed("POL-", "########"), "POL-12345678")),
    ("rate", builtin(Generator::Rate, "5%")),
    ("ssn", builtin(Generator::Digits("^##-^#-^###"), "123-45-6789")),
    (
        "test result",
        builtin(Generator::OneOf(&["Positive", "Negative", "Normal"]), "Result"),
    ),
    ("time", builtin(Generator::Time, "12:00:00")),
    ("zip", builtin(Generator::PostCode, "12345")),
];

fn street_address(rng: &mut dyn RngCore) -> String {
    let number: String = BuildingNumber().fake_with_rng(rng);
    let street: String = StreetName().fake_with_rng(rng);
    format!("{number} {street}")
}

fn random_date(rng: &mut dyn RngCore, from_year: i32, to_year: i32) -> NaiveDate {
    let year = rng.gen_range(from_year..=to_year);
    let ordinal = rng.gen_range(1..=365);
    NaiveDate::from_yo_opt(year, ordinal).unwrap_or_default()
}

fn recent_date(rng: &mut dyn RngCore) -> NaiveDate {
    let this_year = Utc::now().year();
    random_date(rng, this_year - 5, this_year)
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::taxonomy;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use regex::Regex;
    use test_case::test_case;

    fn produce(category: &str, seed: u64) -> String {
        let (_, builtin) = BUILTINS
            .iter()
            .find(|(name, _)| *name == category)
            .unwrap_or_else(|| panic!("no generator for {category}"));
        let mut rng = StdRng::seed_from_u64(seed);
        builtin.generate(&mut rng)
    }

    #[test]
    fn test_every_category_has_a_generator() {
        for category in taxonomy::ALL_CATEGORIES {
            assert!(
                BUILTINS.iter().any(|(name, _)| name == category),
                "missing generator for '{category}'"
            );
        }
        assert_eq!(BUILTINS.len(), taxonomy::ALL_CATEGORIES.len());
    }

    #[test_case("date", r"^\d{4}-\d{2}-\d{2}$" ; "iso date")]
    #[test_case("discharge date", r"^\d{4}-\d{2}-\d{2}$" ; "discharge date")]
    #[test_case("dob", r"^\d{2}/\d{2}/\d{4}$" ; "birth date")]
    #[test_case("date interval", r"^\d{4}-\d{2}-\d{2} to \d{4}-\d{2}-\d{2}$" ; "interval")]
    #[test_case("time", r"^\d{2}:\d{2}:\d{2}$" ; "time")]
    #[test_case("money", r"^\$\d{1,3}(,\d{3})*$" ; "money")]
    #[test_case("rate", r"^\d{1,3}%$" ; "rate")]
    #[test_case("ssn", r"^[1-9]\d{2}-[1-9]\d-[1-9]\d{3}$" ; "ssn")]
    #[test_case("cvv", r"^\d{3}$" ; "cvv")]
    #[test_case("pin", r"^\d{4}$" ; "pin")]
    #[test_case("policy number", r"^POL-\d{8}$" ; "policy number")]
    #[test_case("passport number", r"^[A-Z]\d{8}$" ; "passport")]
    #[test_case("credit card expiration", r"^\d{2}/\d{2}$" ; "card expiry")]
    #[test_case("email address", r"^[^@\s]+@[^@\s]+\.[a-z]+$" ; "email")]
    #[test_case("name medical professional", r"^Dr\. \S" ; "doctor")]
    #[test_case("county", r" County$" ; "county")]
    #[test_case("organization medical facility", r" Hospital$" ; "hospital")]
    #[test_case("planduration", r"^\d{1,2} months$" ; "plan duration")]
    #[test_case("duration", r"^\d{1,3} (days|weeks|months)$" ; "duration")]
    #[test_case("age", r"^\d{2}$" ; "age")]
    fn test_generated_shape(category: &str, pattern: &str) {
        let re = Regex::new(pattern).unwrap();
        for seed in 0..20 {
            let value = produce(category, seed);
            assert!(re.is_match(&value), "{category} produced '{value}'");
        }
    }

    #[test]
    fn test_phone_has_enough_digits() {
        for seed in 0..20 {
            let value = produce("phone number", seed);
            let digits = value.chars().filter(char::is_ascii_digit).count();
            assert!(digits >= 7, "phone number '{value}' too short");
        }
    }

    #[test]
    fn test_month_is_a_month_name() {
        let months = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        for seed in 0..20 {
            let value = produce("month", seed);
            assert!(months.contains(&value.as_str()), "unexpected month '{value}'");
        }
    }

    #[test]
    fn test_same_seed_same_value() {
        assert_eq!(produce("name", 7), produce("name", 7));
        assert_eq!(produce("location address", 7), produce("location address", 7));
    }

    #[test]
    fn test_values_are_never_empty() {
        for (category, _) in BUILTINS {
            for seed in 0..5 {
                assert!(!produce(category, seed).is_empty(), "{category} empty");
            }
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(100), "100");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(100_000), "100,000");
        assert_eq!(group_thousands(48_200), "48,200");
    }
}
