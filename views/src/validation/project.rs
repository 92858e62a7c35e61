use chrono::NaiveDate;
use shared_types::{
    CreateProjectRequest, NewProject, ProjectPriority, ProjectStatus, ProjectType,
    ValidationErrors,
};

use super::{check_field, non_blank_entries, non_empty, Rule};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate the add-project form.
///
/// `today` anchors the "start date cannot be in the past" rule so callers
/// and tests control the clock.
pub fn validate_new_project(
    request: CreateProjectRequest,
    today: NaiveDate,
) -> Result<NewProject, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let project_name = request.project_name.trim().to_string();
    check_field(
        &mut errors,
        "project_name",
        &project_name,
        &[
            Rule::MinChars(3, "Project name must be at least 3 characters"),
            Rule::MaxChars(100, "Project name must not exceed 100 characters"),
        ],
    );

    check_field(
        &mut errors,
        "client_id",
        &request.client_id,
        &[Rule::Required("Please select a client")],
    );

    let description = request.description.trim().to_string();
    check_field(
        &mut errors,
        "description",
        &description,
        &[
            Rule::MinChars(10, "Description must be at least 10 characters"),
            Rule::MaxChars(500, "Description must not exceed 500 characters"),
        ],
    );

    let project_type = request.project_type.parse::<ProjectType>().ok();
    if project_type.is_none() {
        errors.add("project_type", "Please select a valid project type");
    }
    let status = request.status.parse::<ProjectStatus>().ok();
    if status.is_none() {
        errors.add("status", "Please select a valid status");
    }
    let priority = request.priority.parse::<ProjectPriority>().ok();
    if priority.is_none() {
        errors.add("priority", "Please select a valid priority level");
    }

    let start_date = parse_date(&mut errors, "start_date", &request.start_date, "Start date is required");
    if let Some(start) = start_date {
        if start < today {
            errors.add("start_date", "Start date cannot be in the past");
        }
    }

    let end_date = parse_date(&mut errors, "end_date", &request.end_date, "End date is required");
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end <= start {
            errors.add("end_date", "End date must be after start date");
        }
    }

    let budget = parse_budget(&mut errors, &request.budget);

    let team_members = non_blank_entries(&request.team_members);
    if team_members.is_empty() {
        errors.add("team_members", "At least one team member is required");
    }

    let notes = non_empty(request.notes.as_deref()).map(str::to_string);
    if let Some(notes) = &notes {
        check_field(
            &mut errors,
            "notes",
            notes,
            &[Rule::MaxChars(1000, "Notes must not exceed 1000 characters")],
        );
    }

    match (project_type, status, priority, budget) {
        (Some(project_type), Some(status), Some(priority), Some(budget)) if errors.is_empty() => {
            Ok(NewProject {
                project_name,
                client_id: request.client_id,
                description,
                project_type,
                status,
                priority,
                start_date: request.start_date,
                end_date: request.end_date,
                budget,
                team_members,
                tags: non_blank_entries(&request.tags),
                notes,
            })
        }
        _ => Err(errors),
    }
}

fn parse_date(
    errors: &mut ValidationErrors,
    field: &str,
    value: &str,
    required_message: &str,
) -> Option<NaiveDate> {
    if value.is_empty() {
        errors.add(field, required_message);
        return None;
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "Please enter a valid date (YYYY-MM-DD)");
            None
        }
    }
}

fn parse_budget(errors: &mut ValidationErrors, value: &str) -> Option<f64> {
    if value.is_empty() {
        errors.add("budget", "Budget is required");
        return None;
    }
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Some(amount),
        _ => {
            errors.add("budget", "Budget must be a valid positive number");
            None
        }
    }
}
