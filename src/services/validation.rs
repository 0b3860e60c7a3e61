use crate::{
    error::{AppError, AppResult, FieldViolation},
    models::{genre, streaming_service, DiscoverParams, FilterCriteria},
};

/// Most genres a single discovery may combine
pub const MAX_GENRES: usize = 3;

/// Sentinel language value meaning "no language filter"
pub const ANY_LANGUAGE: &str = "any";

const SERVICE_FIELD: &str = "streamingService";

const LIST_DELIMITER: char = ',';

/// Validates raw discovery parameters into [`FilterCriteria`]
///
/// Every field is checked independently and all violations are reported together,
/// each tagged with the query parameter it came from.
pub fn validate_filters(raw: &DiscoverParams, default_region: &str) -> AppResult<FilterCriteria> {
    validate(raw, default_region, false)
}

/// Like [`validate_filters`], but at least one streaming service must be selected
pub fn validate_streaming_filters(
    raw: &DiscoverParams,
    default_region: &str,
) -> AppResult<FilterCriteria> {
    validate(raw, default_region, true)
}

fn validate(
    raw: &DiscoverParams,
    default_region: &str,
    require_service: bool,
) -> AppResult<FilterCriteria> {
    let mut violations = Vec::new();

    let genres = parse_genres(present(&raw.genre), &mut violations);

    let start_year = parse_year("startYear", present(&raw.start_year), &mut violations);
    let end_year = parse_year("endYear", present(&raw.end_year), &mut violations);
    if let (Some(start), Some(end)) = (start_year, end_year) {
        if start > end {
            violations.push(FieldViolation::new(
                "startYear",
                format!("start year {start} cannot be greater than end year {end}"),
            ));
        }
    }

    let min_runtime = parse_runtime("minRuntime", present(&raw.min_runtime), &mut violations);
    let max_runtime = parse_runtime("maxRuntime", present(&raw.max_runtime), &mut violations);
    if let (Some(min), Some(max)) = (min_runtime, max_runtime) {
        if min > max {
            violations.push(FieldViolation::new(
                "minRuntime",
                format!("minimum runtime {min} cannot be greater than maximum runtime {max}"),
            ));
        }
    }

    let language = parse_language(present(&raw.language), &mut violations);
    let region = parse_region(present(&raw.region), default_region, &mut violations);
    let services = parse_streaming_services(present(&raw.streaming_service), &mut violations);
    if require_service && services.is_empty() && violations.iter().all(|v| v.field != SERVICE_FIELD) {
        violations.push(FieldViolation::new(
            SERVICE_FIELD,
            "at least one streaming service is required",
        ));
    }

    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    Ok(FilterCriteria::new(
        genres,
        (start_year, end_year),
        (min_runtime, max_runtime),
        language,
        region,
    )
    .with_streaming_services(services))
}

/// Treats blank query values the same as absent ones
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_genres(value: Option<&str>, violations: &mut Vec<FieldViolation>) -> Vec<u32> {
    let Some(value) = value else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    for token in value.split(LIST_DELIMITER).map(str::trim) {
        if token.is_empty() {
            continue;
        }

        let id = match token.parse::<u32>() {
            Ok(id) if genre::is_known_id(id) => Some(id),
            Ok(_) => None,
            Err(_) => genre::name_to_id(token),
        };

        match id {
            Some(id) if !ids.contains(&id) => ids.push(id),
            Some(_) => {}
            None => violations.push(FieldViolation::new(
                "genre",
                format!("unknown genre '{token}'"),
            )),
        }
    }

    if ids.len() > MAX_GENRES {
        violations.push(FieldViolation::new(
            "genre",
            format!("at most {MAX_GENRES} genres may be combined, got {}", ids.len()),
        ));
    }

    ids
}

fn parse_streaming_services(
    value: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Vec<&'static str> {
    let Some(value) = value else {
        return Vec::new();
    };

    let mut ids = Vec::new();
    for token in value.split(LIST_DELIMITER).map(str::trim) {
        if token.is_empty() {
            continue;
        }

        match streaming_service::find(token) {
            Some(service) if !ids.contains(&service.id) => ids.push(service.id),
            Some(_) => {}
            None => violations.push(FieldViolation::new(
                SERVICE_FIELD,
                format!("unknown streaming service '{token}'"),
            )),
        }
    }

    ids
}

fn parse_year(
    field: &'static str,
    value: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<i32> {
    let value = value?;
    match value.parse::<i32>() {
        Ok(year) if (1000..=9999).contains(&year) => Some(year),
        Ok(_) => {
            violations.push(FieldViolation::new(
                field,
                format!("'{value}' is not a four-digit year"),
            ));
            None
        }
        Err(_) => {
            violations.push(FieldViolation::new(
                field,
                format!("'{value}' must be a valid number"),
            ));
            None
        }
    }
}

fn parse_runtime(
    field: &'static str,
    value: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<u32> {
    let value = value?;
    match value.parse::<u32>() {
        Ok(minutes) => Some(minutes),
        Err(_) => {
            violations.push(FieldViolation::new(
                field,
                format!("'{value}' must be a non-negative whole number of minutes"),
            ));
            None
        }
    }
}

fn parse_language(value: Option<&str>, violations: &mut Vec<FieldViolation>) -> Option<String> {
    let value = value?;
    if value.eq_ignore_ascii_case(ANY_LANGUAGE) {
        return None;
    }

    if is_two_letter_code(value) {
        Some(value.to_ascii_lowercase())
    } else {
        violations.push(FieldViolation::new(
            "language",
            format!("'{value}' is not a two-letter language code or '{ANY_LANGUAGE}'"),
        ));
        None
    }
}

fn parse_region(
    value: Option<&str>,
    default_region: &str,
    violations: &mut Vec<FieldViolation>,
) -> String {
    match value {
        None => default_region.to_ascii_lowercase(),
        Some(code) if is_two_letter_code(code) => code.to_ascii_lowercase(),
        Some(code) => {
            violations.push(FieldViolation::new(
                "region",
                format!("'{code}' is not a two-letter region code"),
            ));
            default_region.to_ascii_lowercase()
        }
    }
}

fn is_two_letter_code(value: &str) -> bool {
    value.len() == 2 && value.chars().all(|c| c.is_ascii_alphabetic())
}
