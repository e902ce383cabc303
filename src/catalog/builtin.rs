//! Built-in prototype data

use super::{Application, Catalog, VersionReference, Workflow};

fn workflow(name: &str, version: &str, kind: &str, reference: &str, devices: u64) -> Workflow {
    Workflow {
        name: name.to_string(),
        version: version.to_string(),
        kind: kind.to_string(),
        version_reference: VersionReference::from(reference),
        devices,
    }
}

fn versions(list: &[&str]) -> Vec<String> {
    list.iter().map(|v| (*v).to_string()).collect()
}

pub(super) fn catalog() -> Catalog {
    Catalog::new(vec![
        Application {
            name: "7-Zip".to_string(),
            available_versions: versions(&["23.01", "22.01", "21.07", "19.00"]),
            workflows: vec![
                // Tracking the rolling latest version
                workflow("Desktop Onboarding - Standard", "v3.2", "Onboarding", "latest", 1248),
                workflow("Software Update - Q1 2026", "v2.1", "Regular", "latest", 842),
                workflow("Engineering Workstation Config", "v4.0", "Regular", "latest", 512),
                workflow("Remote Worker Initial Setup", "v2.8", "Onboarding", "latest", 1890),
                workflow("Contractor Device Provisioning", "v1.0", "Onboarding", "latest", 234),
                // Pinned
                workflow("Q4 2025 Standard Deployment", "v2.3", "Regular", "23.01", 678),
                workflow("Finance Department Setup", "v1.5", "Onboarding", "22.01", 356),
                workflow("Security Compliance Update", "v1.2", "Regular", "21.07", 2145),
                workflow("Legacy Systems Maintenance", "v0.9", "Regular", "19.00", 98),
            ],
        },
        Application {
            name: "1Password".to_string(),
            available_versions: versions(&["8.10.16", "8.9.12", "8.8.0"]),
            workflows: vec![
                workflow("Desktop Onboarding - Standard", "v3.2", "Onboarding", "latest", 1248),
                workflow("Security Compliance Update", "v1.2", "Regular", "latest", 2145),
                workflow("Finance Department Setup", "v1.5", "Onboarding", "8.9.12", 356),
            ],
        },
    ])
}
