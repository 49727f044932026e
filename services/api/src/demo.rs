use caseload::error::AppError;
use caseload::intake::{
    IntakeService, IntakeSnapshot, UploadedFile, DEFAULT_MAX_UPLOAD_BATCH,
};
use clap::Args;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Caseworker name used for the demo session.
    #[arg(long, default_value = "Dana")]
    pub(crate) caseworker: String,
    /// Applicants to add, in order (defaults to Alice and Bob).
    #[arg(long = "applicant")]
    pub(crate) applicants: Vec<String>,
    /// Document recorded for the first applicant.
    #[arg(long, default_value = "ID Card")]
    pub(crate) document: String,
    /// Skip deleting the first applicant at the end of the walkthrough.
    #[arg(long)]
    pub(crate) keep_applicants: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        caseworker,
        applicants,
        document,
        keep_applicants,
    } = args;

    let applicants = if applicants.is_empty() {
        vec!["Alice".to_string(), "Bob".to_string()]
    } else {
        applicants
    };

    let service = IntakeService::new(DEFAULT_MAX_UPLOAD_BATCH);
    let session = service.sign_in(&caseworker)?;
    println!(
        "Caseload demo (signed in as {})",
        session.caseworker.as_deref().unwrap_or("unknown")
    );

    let mut snapshot = service.snapshot()?;
    for name in &applicants {
        snapshot = service.add_applicant(name)?;
    }
    render_snapshot("After adding applicants", &snapshot);

    while snapshot.navigation.can_select_previous {
        snapshot = service.select_previous()?;
    }
    render_snapshot("Back to the first applicant", &snapshot);

    snapshot = service.add_document(&document)?;
    if let Some(recorded) = snapshot.documents.last() {
        let id = recorded.id.clone();
        snapshot = service.add_files(
            &id,
            vec![
                UploadedFile::new("scan.png", "demo://scan.png"),
                UploadedFile::new("scan-back.png", "demo://scan-back.png"),
            ],
        )?;
    }
    render_snapshot("After uploading files", &snapshot);

    if !keep_applicants {
        snapshot = service.delete_applicant()?;
        render_snapshot("After deleting the selected applicant", &snapshot);
    }

    service.sign_out()?;
    Ok(())
}

fn render_snapshot(heading: &str, snapshot: &IntakeSnapshot) {
    println!("\n{heading}");

    if snapshot.applicants.is_empty() {
        println!("- no applicants");
        return;
    }

    for (index, applicant) in snapshot.applicants.iter().enumerate() {
        let marker = if snapshot.cursor == Some(index) { '>' } else { ' ' };
        println!("{marker} {} ({})", applicant.name, applicant.id);
    }

    if let Some(current) = &snapshot.current_applicant {
        if snapshot.documents.is_empty() {
            println!("  Documents for {}: none", current.name);
        } else {
            println!(
                "  Documents for {} ({} files)",
                current.name,
                snapshot.file_count()
            );
            for document in &snapshot.documents {
                println!("  - {} [{} files]", document.name, document.files.len());
                for (position, file) in document.files.iter().enumerate() {
                    println!("      {position}: {} -> {}", file.name, file.handle.0);
                }
            }
        }
    }

    if snapshot.navigation.visible {
        println!(
            "  Navigation: prev {} / next {}",
            enabled(snapshot.navigation.can_select_previous),
            enabled(snapshot.navigation.can_select_next)
        );
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}
