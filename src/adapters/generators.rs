//! Individual value generators behind the type-name dispatch table.
//!
//! Every generator has the same shape, `fn(&Constraints) -> Result<Value>`,
//! so they can be stored as plain function pointers. Generators that take
//! no options simply ignore their argument.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, TimeZone, Utc};
use fake::faker::address::en::{BuildingNumber, CityName, CountryName, StreetName, ZipCode};
use fake::faker::company::en::{Buzzword, CatchPhase, CompanyName, Profession};
use fake::faker::internet::en::{DomainSuffix, FreeEmail, IPv4, Password, UserAgent, Username};
use fake::faker::job::en::Title;
use fake::faker::lorem::en::{Paragraph, Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

use crate::domain::{Constraints, GenerationError};

pub type GeneratorResult = Result<Value, GenerationError>;

/// Upper bound for generated string lengths and digit counts.
pub const MAX_GENERATED_LEN: usize = 10_000;

const DEFAULT_DATE_FROM: &str = "2020-01-01";
const DEFAULT_DATE_TO: &str = "2024-12-31";

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const MS_PER_YEAR: i64 = 365 * MS_PER_DAY;

const ALPHA: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const GENDERS: &[&str] = &[
    "Female",
    "Male",
    "Non-binary",
    "Agender",
    "Genderfluid",
    "Genderqueer",
    "Bigender",
    "Two-spirit",
];

const DEPARTMENTS: &[&str] = &[
    "Books", "Movies", "Music", "Games", "Electronics", "Computers", "Home", "Garden", "Tools",
    "Grocery", "Health", "Beauty", "Toys", "Kids", "Baby", "Clothing", "Shoes", "Jewelery",
    "Sports", "Outdoors", "Automotive", "Industrial",
];

const PRODUCT_ADJECTIVES: &[&str] = &[
    "Small", "Ergonomic", "Electronic", "Rustic", "Intelligent", "Gorgeous", "Incredible",
    "Elegant", "Fantastic", "Practical", "Modern", "Recycled", "Sleek", "Bespoke", "Awesome",
    "Generic", "Handcrafted", "Handmade", "Oriental", "Licensed", "Luxurious", "Refined",
    "Unbranded", "Tasty",
];

const PRODUCT_MATERIALS: &[&str] = &[
    "Steel", "Bronze", "Wooden", "Concrete", "Plastic", "Cotton", "Granite", "Rubber", "Metal",
    "Soft", "Fresh", "Frozen",
];

const PRODUCT_NAMES: &[&str] = &[
    "Chair", "Car", "Computer", "Keyboard", "Mouse", "Bike", "Ball", "Gloves", "Pants", "Shirt",
    "Table", "Shoes", "Hat", "Towels", "Soap", "Tuna", "Chicken", "Fish", "Cheese", "Bacon",
    "Pizza", "Salad", "Sausages", "Chips",
];

const COLORS: &[&str] = &[
    "red", "green", "blue", "yellow", "purple", "mint green", "teal", "white", "black",
    "orange", "pink", "grey", "maroon", "violet", "turquoise", "tan", "sky blue", "salmon",
    "plum", "orchid", "olive", "magenta", "lime", "ivory", "indigo", "gold", "fuchsia", "cyan",
    "azure", "lavender", "silver",
];

// Numbers and identifiers

pub fn number(c: &Constraints) -> GeneratorResult {
    random_int(c, 0.0, 1000.0)
}

pub fn float(c: &Constraints) -> GeneratorResult {
    random_float(c, 0.0, 1000.0, 2)
}

pub fn id(c: &Constraints) -> GeneratorResult {
    let digits = c.length("zeros")?.unwrap_or(5);
    Ok(json!(numeric_string(digits)?))
}

pub fn uuid(_: &Constraints) -> GeneratorResult {
    Ok(json!(uuid::Uuid::new_v4().to_string()))
}

// Strings

pub fn string(c: &Constraints) -> GeneratorResult {
    let min = c.length("min")?.unwrap_or(5);
    let max = c.length("max")?.unwrap_or(10);
    Ok(json!(alpha_string(min, max)?))
}

pub fn sentence(_: &Constraints) -> GeneratorResult {
    Ok(json!(Sentence(3..10).fake::<String>()))
}

pub fn paragraph(_: &Constraints) -> GeneratorResult {
    Ok(json!(Paragraph(3..6).fake::<String>()))
}

pub fn word(_: &Constraints) -> GeneratorResult {
    Ok(json!(Word().fake::<String>()))
}

// Dates and times

pub fn date(c: &Constraints) -> GeneratorResult {
    let from = instant(c, "from", DEFAULT_DATE_FROM)?;
    let to = instant(c, "to", DEFAULT_DATE_TO)?;
    if from > to {
        return Err(GenerationError::invalid(
            "to",
            format!("'to' ({}) must not be earlier than 'from' ({})", iso(to), iso(from)),
        ));
    }
    let ms = rand::thread_rng().gen_range(from.timestamp_millis()..=to.timestamp_millis());
    Ok(json!(iso(from_millis(ms)?)))
}

pub fn past(_: &Constraints) -> GeneratorResult {
    let offset = rand::thread_rng().gen_range(1..=MS_PER_YEAR);
    Ok(json!(iso(Utc::now() - Duration::milliseconds(offset))))
}

pub fn future(_: &Constraints) -> GeneratorResult {
    let offset = rand::thread_rng().gen_range(1..=MS_PER_YEAR);
    Ok(json!(iso(Utc::now() + Duration::milliseconds(offset))))
}

pub fn recent(_: &Constraints) -> GeneratorResult {
    Ok(json!(iso(from_millis(recent_millis())?)))
}

/// Epoch milliseconds within the last day.
pub fn timestamp(_: &Constraints) -> GeneratorResult {
    Ok(json!(recent_millis()))
}

// Person

pub fn first_name(_: &Constraints) -> GeneratorResult {
    Ok(json!(FirstName().fake::<String>()))
}

pub fn last_name(_: &Constraints) -> GeneratorResult {
    Ok(json!(LastName().fake::<String>()))
}

pub fn full_name(_: &Constraints) -> GeneratorResult {
    Ok(json!(Name().fake::<String>()))
}

pub fn username(_: &Constraints) -> GeneratorResult {
    Ok(json!(Username().fake::<String>()))
}

pub fn email(_: &Constraints) -> GeneratorResult {
    Ok(json!(FreeEmail().fake::<String>()))
}

pub fn avatar(_: &Constraints) -> GeneratorResult {
    let user = rand::thread_rng().gen_range(1..100_000_000u32);
    Ok(json!(format!("https://avatars.githubusercontent.com/u/{}", user)))
}

pub fn phone(_: &Constraints) -> GeneratorResult {
    Ok(json!(PhoneNumber().fake::<String>()))
}

pub fn gender(_: &Constraints) -> GeneratorResult {
    Ok(json!(pick(GENDERS)))
}

pub fn job_title(_: &Constraints) -> GeneratorResult {
    Ok(json!(Title().fake::<String>()))
}

pub fn bio(_: &Constraints) -> GeneratorResult {
    let profession = Profession().fake::<String>().to_lowercase();
    let bio = match rand::thread_rng().gen_range(0..3) {
        0 => format!("{} enthusiast", Word().fake::<String>()),
        1 => format!("{}, {} fan", profession, Buzzword().fake::<String>()),
        _ => format!("{} {}", capitalize(&Buzzword().fake::<String>()), profession),
    };
    Ok(json!(bio))
}

// Internet

pub fn url(_: &Constraints) -> GeneratorResult {
    Ok(json!(format!(
        "https://{}.{}/",
        Word().fake::<String>().to_lowercase(),
        DomainSuffix().fake::<String>()
    )))
}

pub fn ipv4(_: &Constraints) -> GeneratorResult {
    Ok(json!(IPv4().fake::<String>()))
}

pub fn password(_: &Constraints) -> GeneratorResult {
    Ok(json!(Password(15..16).fake::<String>()))
}

pub fn user_agent(_: &Constraints) -> GeneratorResult {
    Ok(json!(UserAgent().fake::<String>()))
}

// Location

pub fn latitude(_: &Constraints) -> GeneratorResult {
    Ok(json!(round_to(rand::thread_rng().gen_range(-90.0..=90.0), 4)))
}

pub fn longitude(_: &Constraints) -> GeneratorResult {
    Ok(json!(round_to(rand::thread_rng().gen_range(-180.0..=180.0), 4)))
}

pub fn city(_: &Constraints) -> GeneratorResult {
    Ok(json!(CityName().fake::<String>()))
}

pub fn country(_: &Constraints) -> GeneratorResult {
    Ok(json!(CountryName().fake::<String>()))
}

pub fn street_address(_: &Constraints) -> GeneratorResult {
    Ok(json!(format!(
        "{} {}",
        BuildingNumber().fake::<String>(),
        StreetName().fake::<String>()
    )))
}

pub fn zip_code(_: &Constraints) -> GeneratorResult {
    Ok(json!(ZipCode().fake::<String>()))
}

// Company and commerce

pub fn company(_: &Constraints) -> GeneratorResult {
    Ok(json!(CompanyName().fake::<String>()))
}

pub fn catch_phrase(_: &Constraints) -> GeneratorResult {
    Ok(json!(CatchPhase().fake::<String>()))
}

pub fn department(_: &Constraints) -> GeneratorResult {
    Ok(json!(pick(DEPARTMENTS)))
}

pub fn product(_: &Constraints) -> GeneratorResult {
    Ok(json!(format!(
        "{} {} {}",
        pick(PRODUCT_ADJECTIVES),
        pick(PRODUCT_MATERIALS),
        pick(PRODUCT_NAMES)
    )))
}

/// Price as a string with two decimals, like a price tag.
pub fn price(c: &Constraints) -> GeneratorResult {
    let (min, max) = bounds(c, 1.0, 1000.0)?;
    let value = round_to(rand::thread_rng().gen_range(min..=max), 2).clamp(min, max);
    Ok(json!(format!("{:.2}", value)))
}

pub fn color(_: &Constraints) -> GeneratorResult {
    Ok(json!(pick(COLORS)))
}

pub fn boolean(_: &Constraints) -> GeneratorResult {
    Ok(json!(rand::thread_rng().gen_bool(0.5)))
}

// Shared helpers

/// Reads `min`/`max`, falling back to the given defaults.
pub fn bounds(c: &Constraints, default_min: f64, default_max: f64) -> Result<(f64, f64), GenerationError> {
    let min = c.number("min")?.unwrap_or(default_min);
    let max = c.number("max")?.unwrap_or(default_max);
    if min > max {
        return Err(GenerationError::invalid(
            "max",
            format!("max ({}) must not be less than min ({})", max, min),
        ));
    }
    Ok((min, max))
}

pub fn random_int(c: &Constraints, default_min: f64, default_max: f64) -> GeneratorResult {
    let (min, max) = bounds(c, default_min, default_max)?;
    let (low, high) = (min.ceil() as i64, max.floor() as i64);
    if low > high {
        return Err(GenerationError::invalid(
            "max",
            format!("no integer between {} and {}", min, max),
        ));
    }
    Ok(json!(rand::thread_rng().gen_range(low..=high)))
}

pub fn random_float(
    c: &Constraints,
    default_min: f64,
    default_max: f64,
    decimals: i32,
) -> GeneratorResult {
    let (min, max) = bounds(c, default_min, default_max)?;
    let value = rand::thread_rng().gen_range(min..=max);
    Ok(json!(round_to(value, decimals).clamp(min, max)))
}

pub fn numeric_string(len: usize) -> Result<String, GenerationError> {
    check_len("length", len)?;
    let mut rng = rand::thread_rng();
    Ok((0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect())
}

pub fn alpha_string(min: usize, max: usize) -> Result<String, GenerationError> {
    check_len("max", max)?;
    if min > max {
        return Err(GenerationError::invalid(
            "max",
            format!("max ({}) must not be less than min ({})", max, min),
        ));
    }
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(min..=max);
    Ok((0..len)
        .map(|_| char::from(ALPHA[rng.gen_range(0..ALPHA.len())]))
        .collect())
}

/// Parses a date constraint given as `YYYY-MM-DD`, RFC 3339 or epoch millis.
pub fn instant(c: &Constraints, key: &str, default: &str) -> Result<DateTime<Utc>, GenerationError> {
    match c.get(key) {
        None => parse_instant(key, default),
        Some(Value::String(s)) => parse_instant(key, s),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(ms) => from_millis(ms),
            None => Err(GenerationError::invalid(key, "expected epoch milliseconds")),
        },
        Some(other) => Err(GenerationError::invalid(
            key,
            format!("expected a date, got {}", other),
        )),
    }
}

fn parse_instant(key: &str, s: &str) -> Result<DateTime<Utc>, GenerationError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| GenerationError::invalid(key, format!("'{}' is not a valid date", s)))
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>, GenerationError> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| GenerationError::invalid("date", format!("{} is out of range", ms)))
}

fn recent_millis() -> i64 {
    Utc::now().timestamp_millis() - rand::thread_rng().gen_range(0..=MS_PER_DAY)
}

/// Serializes the way JSON dates usually travel: UTC, millisecond precision.
pub fn iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn check_len(key: &str, len: usize) -> Result<(), GenerationError> {
    if len > MAX_GENERATED_LEN {
        return Err(GenerationError::invalid(
            key,
            format!("{} exceeds the limit of {}", len, MAX_GENERATED_LEN),
        ));
    }
    Ok(())
}

pub fn pick(values: &[&'static str]) -> &'static str {
    values.choose(&mut rand::thread_rng()).copied().unwrap_or_default()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
