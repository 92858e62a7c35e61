use shared_types::*;
use std::fs;
use std::path::Path;
use ts_rs::TS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate TypeScript definitions for API types
    let mut types = Vec::new();

    // Client types
    types.push(clean_type(Client::export_to_string()?));
    types.push(clean_type(CreateClientRequest::export_to_string()?));
    types.push(clean_type(ClientsResponse::export_to_string()?));
    types.push(clean_type(ClientOption::export_to_string()?));
    types.push(clean_type(ClientOptionsResponse::export_to_string()?));

    // Project types
    types.push(clean_type(Project::export_to_string()?));
    types.push(clean_type(ProjectStatus::export_to_string()?));
    types.push(clean_type(ProjectPriority::export_to_string()?));
    types.push(clean_type(ProjectType::export_to_string()?));
    types.push(clean_type(CreateProjectRequest::export_to_string()?));
    types.push(clean_type(SortKey::export_to_string()?));
    types.push(clean_type(StatusCount::export_to_string()?));
    types.push(clean_type(ProjectsView::export_to_string()?));
    types.push(clean_type(CreatedResponse::export_to_string()?));

    // Auth types
    types.push(clean_type(AuthCredentials::export_to_string()?));
    types.push(clean_type(AuthUser::export_to_string()?));
    types.push(clean_type(AuthSession::export_to_string()?));

    // Dashboard types
    types.push(clean_type(DashboardCard::export_to_string()?));
    types.push(clean_type(DashboardResponse::export_to_string()?));

    // Validation types
    types.push(clean_type(ValidationErrors::export_to_string()?));
    types.push(clean_type(ValidationErrorResponse::export_to_string()?));

    let output_dir = Path::new("../gui/src/api-types");
    fs::create_dir_all(output_dir)?;

    let output_path = output_dir.join("types.ts");
    let output = types.join("\n\n");

    fs::write(&output_path, output)?;
    println!("Generated TypeScript types in {}", output_path.display());

    Ok(())
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    // Types that reference other types (ProjectsView -> Project) carry import lines
    let lines: Vec<&str> = type_def.lines().collect();
    let has_import = lines
        .iter()
        .any(|line| line.trim().starts_with("import type"));

    let filtered: Vec<&str> = lines
        .iter()
        .filter(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with("import type") {
                return has_import;
            }
            !trimmed.starts_with("// This file was generated")
                && !trimmed.starts_with("/* This file was generated")
        })
        .cloned()
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
