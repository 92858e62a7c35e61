use regex::Regex;
use shared_types::{CreateClientRequest, NewClient, ValidationErrors};
use std::sync::LazyLock;

use super::{check_field, non_empty, Rule};

static LETTERS_AND_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid regex"));
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid regex"));
static ZIP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9-]+$").expect("valid regex"));

/// Validate the add-client form
pub fn validate_new_client(request: CreateClientRequest) -> Result<NewClient, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_field(
        &mut errors,
        "full_name",
        &request.full_name,
        &[
            Rule::MinChars(2, "Full name must be at least 2 characters"),
            Rule::MaxChars(50, "Full name must be less than 50 characters"),
            Rule::Matches(&LETTERS_AND_SPACES, "Full name can only contain letters and spaces"),
        ],
    );

    check_field(
        &mut errors,
        "email",
        &request.email,
        &[
            Rule::Matches(&EMAIL, "Please enter a valid email address"),
            Rule::Required("Email is required"),
        ],
    );

    check_field(
        &mut errors,
        "phone",
        &request.phone,
        &[
            Rule::MinChars(10, "Phone number must be at least 10 digits"),
            Rule::MaxChars(15, "Phone number must be less than 15 digits"),
            Rule::Matches(&PHONE, "Please enter a valid phone number"),
        ],
    );

    check_field(
        &mut errors,
        "company",
        &request.company,
        &[
            Rule::MinChars(2, "Company name must be at least 2 characters"),
            Rule::MaxChars(100, "Company name must be less than 100 characters"),
        ],
    );

    check_field(
        &mut errors,
        "address",
        &request.address,
        &[
            Rule::MinChars(5, "Address must be at least 5 characters"),
            Rule::MaxChars(200, "Address must be less than 200 characters"),
        ],
    );

    check_field(
        &mut errors,
        "city",
        &request.city,
        &[
            Rule::MinChars(2, "City must be at least 2 characters"),
            Rule::MaxChars(50, "City must be less than 50 characters"),
            Rule::Matches(&LETTERS_AND_SPACES, "City can only contain letters and spaces"),
        ],
    );

    check_field(
        &mut errors,
        "state",
        &request.state,
        &[
            Rule::MinChars(2, "State must be at least 2 characters"),
            Rule::MaxChars(50, "State must be less than 50 characters"),
            Rule::Matches(&LETTERS_AND_SPACES, "State can only contain letters and spaces"),
        ],
    );

    check_field(
        &mut errors,
        "zip",
        &request.zip,
        &[
            Rule::MinChars(5, "ZIP code must be at least 5 characters"),
            Rule::MaxChars(10, "ZIP code must be less than 10 characters"),
            Rule::Matches(&ZIP, "ZIP code can only contain numbers and hyphens"),
        ],
    );

    let notes = non_empty(request.notes.as_deref()).map(str::to_string);
    if let Some(notes) = &notes {
        check_field(
            &mut errors,
            "notes",
            notes,
            &[Rule::MaxChars(500, "Notes must be less than 500 characters")],
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewClient {
        full_name: request.full_name,
        email: request.email,
        phone: request.phone,
        company: request.company,
        address: request.address,
        city: request.city,
        state: request.state,
        zip: request.zip,
        notes,
    })
}
