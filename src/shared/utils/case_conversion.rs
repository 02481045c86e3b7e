//! Name conversion between the Studio wire format (snake_case) and the
//! camelCase names the authoring client works with.

use regex::Regex;
use std::sync::OnceLock;

static SNAKE_SEGMENT: OnceLock<Regex> = OnceLock::new();
static CAMEL_BOUNDARY: OnceLock<Regex> = OnceLock::new();

pub fn to_camel_case(key: &str) -> String {
    let re = SNAKE_SEGMENT.get_or_init(|| Regex::new(r"_([a-z0-9])").expect("static regex"));
    re.replace_all(key, |caps: &regex::Captures| caps[1].to_uppercase())
        .into_owned()
}

pub fn to_snake_case(key: &str) -> String {
    let re =
        CAMEL_BOUNDARY.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));
    re.replace_all(key, "${1}_${2}").to_lowercase()
}
