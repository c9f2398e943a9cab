//! Quiz management commands
//!
//! Quizzes are created and replaced from definition files (YAML or JSON)
//! because a full quiz carries 3 to 20 questions.

use std::path::Path;

use colored::Colorize;
use dialoguer::Confirm;
use futures::future::join_all;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::article::report_saved;
use crate::cli::context::routes;
use crate::cli::{CommandContext, OutputFormat, QuizFilterArgs};
use crate::client::ContentApi;
use crate::client::models::{QuizDetail, QuizRequest, QuizSummary};
use crate::error::{Error, Result};
use crate::models::QuizDisplay;
use crate::output::formatters::format_minutes;
use crate::output::{Formattable, json, table};

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Run `quiz list`
pub async fn list(opts: &GlobalOptions, filters: &QuizFilterArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::QUIZZES)?;

    let quizzes = fetch_quizzes(ctx.client.as_ref(), filters).await?;
    let display: Vec<QuizDisplay> = quizzes.into_iter().map(QuizDisplay::from).collect();
    display.print(ctx.format)
}

pub async fn fetch_quizzes<C: ContentApi + ?Sized>(
    client: &C,
    filters: &QuizFilterArgs,
) -> Result<Vec<QuizSummary>> {
    let quizzes = client.list_quizzes().await?;
    debug!("Fetched {} quizzes", quizzes.len());
    Ok(filters.apply(quizzes))
}

/// Run `quiz get`
pub async fn get(opts: &GlobalOptions, slug: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::QUIZZES)?;

    let quiz = ctx.client.get_quiz(slug).await?;
    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&quiz)?),
        _ => print_quiz(&quiz),
    }
    Ok(())
}

fn print_quiz(quiz: &QuizDetail) {
    println!(
        "{}",
        table::format_details(&[
            ("UUID", quiz.uuid.clone()),
            ("Slug", quiz.slug.clone()),
            ("Title", quiz.title.clone()),
            ("Level", quiz.level.to_string()),
            ("Category", quiz.category.name.clone()),
            ("Estimate", format_minutes(quiz.estimate)),
            ("Minimum score", quiz.minimum_score.to_string()),
        ])
    );
    println!();
    println!("{}", quiz.desc);

    for (i, question) in quiz.questions.iter().enumerate() {
        println!();
        println!("{} {}", format!("{}.", i + 1).bold(), question.question);
        for (label, option) in OPTION_LABELS.iter().zip(&question.options) {
            println!("   {}) {}", label, option);
        }
    }
}

/// Run `quiz create`
pub async fn create(opts: &GlobalOptions, file: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::QUIZZES)?;

    let request = load_quiz_file(file)?;
    let message = ctx.client.create_quiz(&request).await?;
    report_saved(ctx.format, "Quiz created", message)
}

/// Run `quiz update`
pub async fn update(opts: &GlobalOptions, slug: &str, file: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::QUIZZES)?;

    let request = load_quiz_file(file)?;
    let message = update_quiz(ctx.client.as_ref(), slug, &request).await?;
    report_saved(ctx.format, "Quiz updated", message)
}

/// Replace the quiz identified by `slug`
pub async fn update_quiz<C: ContentApi + ?Sized>(
    client: &C,
    slug: &str,
    request: &QuizRequest,
) -> Result<Option<String>> {
    request.validate()?;
    let current = client.get_quiz(slug).await?;
    debug!("Updating quiz {} ({})", current.slug, current.uuid);
    client.update_quiz(&current.uuid, request).await
}

/// Read and validate a quiz definition. `.json` files are parsed as JSON,
/// anything else as YAML.
pub fn load_quiz_file(path: &Path) -> Result<QuizRequest> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::Validation(format!("Could not read {}: {}", path.display(), e)))?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let request: QuizRequest = if is_json {
        serde_json::from_str(&text)
            .map_err(|e| Error::Validation(format!("Invalid quiz file: {}", e)))?
    } else {
        serde_yaml::from_str(&text)
            .map_err(|e| Error::Validation(format!("Invalid quiz file: {}", e)))?
    };

    request.validate()?;
    Ok(request)
}

/// Run `quiz delete`
pub async fn delete(opts: &GlobalOptions, uuids: &[String], yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::QUIZZES)?;

    if !yes {
        eprintln!(
            "{} Delete {} quiz(zes)? This cannot be undone.",
            "⚠".yellow(),
            uuids.len()
        );
        for uuid in uuids {
            eprintln!("  {}", uuid);
        }
        eprintln!();

        let confirm = Confirm::new()
            .with_prompt("Confirm deletion?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    let results = delete_quizzes(ctx.client.as_ref(), uuids).await;
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();

    match ctx.format {
        OutputFormat::Json => {
            let report: Vec<_> = results
                .iter()
                .map(|(uuid, r)| match r {
                    Ok(_) => serde_json::json!({ "uuid": uuid, "deleted": true }),
                    Err(e) => {
                        serde_json::json!({ "uuid": uuid, "deleted": false, "error": e.to_string() })
                    }
                })
                .collect();
            println!("{}", json::format_json(&report)?);
        }
        _ => {
            for (uuid, result) in &results {
                match result {
                    Ok(_) => println!("{} Deleted {}", "✓".green(), uuid),
                    Err(e) => println!("{} {}: {}", "✗".red(), uuid, e),
                }
            }
        }
    }

    if failed > 0 {
        return Err(Error::Other(format!(
            "{} of {} deletions failed",
            failed,
            results.len()
        )));
    }
    Ok(())
}

/// Delete quizzes concurrently, keeping per-quiz results in input order
pub async fn delete_quizzes<C: ContentApi + ?Sized>(
    client: &C,
    uuids: &[String],
) -> Vec<(String, Result<Option<String>>)> {
    let results = join_all(uuids.iter().map(|uuid| client.delete_quiz(uuid))).await;
    uuids.iter().cloned().zip(results).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRagaMayaClient;
    use crate::error::ApiError;

    const QUIZ_YAML: &str = r#"
title: Kuis Tari Tradisional
desc: Uji pengetahuanmu tentang tari dari seluruh Nusantara.
level: beginner
category: Seni
estimate: 10
minimum_score: 70
questions:
  - question: Tari Saman berasal dari provinsi mana?
    options: [Aceh, Bali, Papua, Riau]
    answer_index: 0
  - question: Tari Kecak paling terkenal di pulau mana?
    options: [Jawa, Bali, Sumatra, Lombok]
    answer_index: 1
  - question: Tari Piring berasal dari daerah mana?
    options: [Minangkabau, Betawi, Dayak, Bugis]
    answer_index: 0
"#;

    fn write_quiz(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_load_yaml_quiz() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_quiz(temp.path(), "quiz.yaml", QUIZ_YAML);

        let request = load_quiz_file(&path).unwrap();
        assert_eq!(request.questions.len(), 3);
        assert_eq!(request.questions[1].answer_index, 1);
        assert!(request.thumbnail.is_none());
    }

    #[test]
    fn test_load_json_quiz() {
        let temp = tempfile::tempdir().unwrap();
        let request: QuizRequest = serde_yaml::from_str(QUIZ_YAML).unwrap();
        let path = write_quiz(
            temp.path(),
            "quiz.json",
            &serde_json::to_string(&request).unwrap(),
        );

        assert_eq!(load_quiz_file(&path).unwrap(), request);
    }

    #[test]
    fn test_invalid_quiz_file_is_validation_error() {
        let temp = tempfile::tempdir().unwrap();
        let too_few = QUIZ_YAML.split("  - question: Tari Kecak").next().unwrap();
        let path = write_quiz(temp.path(), "quiz.yaml", too_few);

        assert!(matches!(
            load_quiz_file(&path),
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_quizzes_keeps_order_and_failures() {
        let mock = MockRagaMayaClient::new()
            .with_error(ApiError::Rejected {
                status: 409,
                message: "Kuis sedang dipakai".to_string(),
            })
            .await;
        let uuids = vec!["q-1".to_string(), "q-2".to_string()];

        let results = delete_quizzes(&mock, &uuids).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "q-1");
        assert_eq!(results[1].0, "q-2");
        assert_eq!(results.iter().filter(|(_, r)| r.is_err()).count(), 1);
    }

    #[tokio::test]
    async fn test_update_quiz_resolves_uuid_from_slug() {
        let detail: QuizDetail = serde_json::from_value(serde_json::json!({
            "uuid": "q-9",
            "slug": "kuis-tari",
            "title": "Kuis Tari Tradisional",
            "level": "beginner"
        }))
        .unwrap();
        let mock = MockRagaMayaClient::new()
            .with_quiz_details(vec![detail])
            .await;
        let request: QuizRequest = serde_yaml::from_str(QUIZ_YAML).unwrap();

        update_quiz(&mock, "kuis-tari", &request).await.unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured[1].method, "update_quiz");
        assert_eq!(captured[1].target.as_deref(), Some("q-9"));
    }

    #[tokio::test]
    async fn test_fetch_quizzes_applies_filters() {
        let quizzes: Vec<QuizSummary> = serde_json::from_value(serde_json::json!([
            { "uuid": "q-1", "slug": "kuis-tari", "title": "Kuis Tari", "level": "beginner" },
            { "uuid": "q-2", "slug": "kuis-batik", "title": "Kuis Batik", "level": "advanced" }
        ]))
        .unwrap();
        let mock = MockRagaMayaClient::new().with_quizzes(quizzes).await;
        let filters = QuizFilterArgs {
            search: Some("BATIK".to_string()),
            ..Default::default()
        };

        let found = fetch_quizzes(&mock, &filters).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].uuid, "q-2");
        assert_eq!(mock.calls().await, vec!["list_quizzes"]);
    }
}
