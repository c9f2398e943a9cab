//! Article management commands

use std::path::Path;

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::context::routes;
use crate::cli::upload::upload_file;
use crate::cli::{ArticleFieldArgs, ArticleFilterArgs, CommandContext, OutputFormat};
use crate::client::models::{ArticleDetail, ArticleRequest, ArticleSummary};
use crate::client::{AnalyticsApi, ContentApi};
use crate::error::{Error, Result};
use crate::models::ArticleDisplay;
use crate::output::formatters::format_timestamp_local;
use crate::output::{Formattable, json, table};

/// Result of an update attempt
#[derive(Debug, PartialEq)]
pub enum UpdateOutcome {
    Saved(Option<String>),
    Unchanged,
}

/// Run `article list`
pub async fn list(opts: &GlobalOptions, filters: &ArticleFilterArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::ARTICLES)?;

    let articles = fetch_articles(ctx.client.as_ref(), filters).await?;
    let display: Vec<ArticleDisplay> = articles.into_iter().map(ArticleDisplay::from).collect();
    display.print(ctx.format)
}

/// Fetch all articles and apply client-side filters
pub async fn fetch_articles<C: ContentApi + ?Sized>(
    client: &C,
    filters: &ArticleFilterArgs,
) -> Result<Vec<ArticleSummary>> {
    let articles = client.list_articles().await?;
    debug!("Fetched {} articles", articles.len());
    Ok(filters.apply(articles))
}

/// Run `article get`
pub async fn get(opts: &GlobalOptions, slug: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::ARTICLES)?;

    let article = ctx.client.get_article(slug).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&article)?),
        _ => print_article(&article),
    }
    Ok(())
}

fn print_article(article: &ArticleDetail) {
    println!(
        "{}",
        table::format_details(&[
            ("UUID", article.uuid.clone()),
            ("Slug", article.slug.clone()),
            ("Title", article.title.clone()),
            ("Category", article.category.name.clone()),
            ("Thumbnail", article.thumbnail.clone()),
            ("Created", format_timestamp_local(&article.created_at)),
        ])
    );
    println!();
    println!("{}", article.content);
}

/// Run `article create`
pub async fn create(opts: &GlobalOptions, fields: &ArticleFieldArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::ARTICLES)?;

    let message = create_article(ctx.client.as_ref(), fields).await?;
    report_saved(ctx.format, "Article created", message)
}

/// Build, validate and submit a new article
pub async fn create_article<C: ContentApi + AnalyticsApi + ?Sized>(
    client: &C,
    fields: &ArticleFieldArgs,
) -> Result<Option<String>> {
    let content = read_content(fields)?;
    let missing = |name: &str| Error::Validation(format!("--{} is required", name));

    let mut request = ArticleRequest {
        title: fields.title.clone().ok_or_else(|| missing("title"))?,
        content: content.ok_or_else(|| missing("content"))?,
        category: fields.category.clone().ok_or_else(|| missing("category"))?,
        thumbnail: fields.thumbnail.clone().unwrap_or_default(),
    };
    // Text fields are checked before the thumbnail upload
    if let Some(ref file) = fields.thumbnail_file {
        ArticleRequest {
            thumbnail: file.display().to_string(),
            ..request.clone()
        }
        .validate()?;
    }
    request.thumbnail = resolve_thumbnail(client, fields, request.thumbnail).await?;
    request.validate()?;

    client.create_article(&request).await
}

/// Run `article update`
pub async fn update(opts: &GlobalOptions, slug: &str, fields: &ArticleFieldArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::ARTICLES)?;

    match update_article(ctx.client.as_ref(), slug, fields).await? {
        UpdateOutcome::Unchanged => {
            println!("{} No changes to save", "○".dimmed());
            Ok(())
        }
        UpdateOutcome::Saved(message) => report_saved(ctx.format, "Article updated", message),
    }
}

/// Apply field changes to an existing article; skips the call when
/// nothing differs.
pub async fn update_article<C: ContentApi + AnalyticsApi + ?Sized>(
    client: &C,
    slug: &str,
    fields: &ArticleFieldArgs,
) -> Result<UpdateOutcome> {
    let current = client.get_article(slug).await?;
    let original = ArticleRequest::from_detail(&current);

    let mut request = original.clone();
    if let Some(ref title) = fields.title {
        request.title = title.clone();
    }
    if let Some(content) = read_content(fields)? {
        request.content = content;
    }
    if let Some(ref category) = fields.category {
        request.category = category.clone();
    }
    if fields.thumbnail_file.is_none() && request == original {
        return Ok(UpdateOutcome::Unchanged);
    }

    request.thumbnail = resolve_thumbnail(client, fields, request.thumbnail).await?;
    if request == original {
        return Ok(UpdateOutcome::Unchanged);
    }
    request.validate()?;

    debug!("Updating article {} ({})", current.slug, current.uuid);
    let message = client.update_article(&current.uuid, &request).await?;
    Ok(UpdateOutcome::Saved(message))
}

fn read_content(fields: &ArticleFieldArgs) -> Result<Option<String>> {
    match (&fields.content, &fields.content_file) {
        (Some(content), _) => Ok(Some(content.clone())),
        (None, Some(path)) => Ok(Some(read_text(path)?)),
        (None, None) => Ok(None),
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        Error::Validation(format!("Could not read {}: {}", path.display(), e))
    })
}

/// `--thumbnail-file` is uploaded first; otherwise `--thumbnail` or the
/// current value is kept.
async fn resolve_thumbnail<C: AnalyticsApi + ?Sized>(
    client: &C,
    fields: &ArticleFieldArgs,
    current: String,
) -> Result<String> {
    if let Some(ref file) = fields.thumbnail_file {
        return upload_file(client, file).await;
    }
    Ok(fields.thumbnail.clone().unwrap_or(current))
}

pub(crate) fn report_saved(
    format: OutputFormat,
    fallback: &str,
    message: Option<String>,
) -> Result<()> {
    let message = message.unwrap_or_else(|| fallback.to_string());
    match format {
        OutputFormat::Json => println!(
            "{}",
            json::format_json(&serde_json::json!({ "message": message }))?
        ),
        _ => println!("{} {}", "✓".green(), message),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockRagaMayaClient;
    use crate::client::models::Category;

    fn detail() -> ArticleDetail {
        ArticleDetail {
            uuid: "a-1".to_string(),
            slug: "sejarah-batik".to_string(),
            title: "Sejarah Batik Nusantara".to_string(),
            content: "Batik adalah warisan budaya Indonesia yang diakui dunia sejak 2009."
                .to_string(),
            thumbnail: "https://cdn.ragamaya.test/batik.png".to_string(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
            category: Category {
                uuid: "c-1".to_string(),
                name: "Budaya".to_string(),
            },
        }
    }

    async fn mock_with_article() -> MockRagaMayaClient {
        MockRagaMayaClient::new()
            .with_article_details(vec![detail()])
            .await
    }

    #[tokio::test]
    async fn test_update_without_changes_makes_no_call() {
        let mock = mock_with_article().await;
        let fields = ArticleFieldArgs {
            title: Some("Sejarah Batik Nusantara".to_string()),
            ..Default::default()
        };

        let outcome = update_article(&mock, "sejarah-batik", &fields)
            .await
            .unwrap();

        assert_eq!(outcome, UpdateOutcome::Unchanged);
        assert_eq!(mock.calls().await, vec!["get_article"]);
    }

    #[tokio::test]
    async fn test_update_sends_full_record_by_uuid() {
        let mock = mock_with_article().await;
        let fields = ArticleFieldArgs {
            title: Some("Sejarah Batik di Pulau Jawa".to_string()),
            ..Default::default()
        };

        let outcome = update_article(&mock, "sejarah-batik", &fields)
            .await
            .unwrap();
        assert!(matches!(outcome, UpdateOutcome::Saved(_)));

        let captured = mock.captured_requests().await;
        let update = captured.last().unwrap();
        assert_eq!(update.method, "update_article");
        assert_eq!(update.target.as_deref(), Some("a-1"));
        let payload = update.payload.as_ref().unwrap();
        assert_eq!(payload["title"], "Sejarah Batik di Pulau Jawa");
        assert_eq!(payload["category"], "Budaya");
    }

    #[tokio::test]
    async fn test_update_rejects_short_title() {
        let mock = mock_with_article().await;
        let fields = ArticleFieldArgs {
            title: Some("Batik".to_string()),
            ..Default::default()
        };

        let err = update_article(&mock, "sejarah-batik", &fields)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(!mock.calls().await.contains(&"update_article".to_string()));
    }

    #[tokio::test]
    async fn test_create_requires_thumbnail() {
        let mock = MockRagaMayaClient::new();
        let fields = ArticleFieldArgs {
            title: Some("Mengenal Tari Kecak".to_string()),
            content: Some("Tari Kecak berasal dari Bali dan dibawakan oleh puluhan penari pria.".to_string()),
            category: Some("Budaya".to_string()),
            ..Default::default()
        };

        let err = create_article(&mock, &fields).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(mock.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_uploads_thumbnail_file() {
        let temp = tempfile::tempdir().unwrap();
        let thumb = temp.path().join("kecak.png");
        std::fs::write(&thumb, b"png").unwrap();

        let mock = MockRagaMayaClient::new();
        let fields = ArticleFieldArgs {
            title: Some("Mengenal Tari Kecak".to_string()),
            content: Some("Tari Kecak berasal dari Bali dan dibawakan oleh puluhan penari pria.".to_string()),
            category: Some("Budaya".to_string()),
            thumbnail_file: Some(thumb),
            ..Default::default()
        };

        create_article(&mock, &fields).await.unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured[0].method, "upload");
        assert_eq!(
            captured[1].payload.as_ref().unwrap()["thumbnail"],
            "https://storage.ragamaya.test/kecak.png"
        );
    }

    #[tokio::test]
    async fn test_fetch_articles_applies_filters() {
        let mock = MockRagaMayaClient::new()
            .with_articles(vec![ArticleSummary {
                uuid: "a-1".to_string(),
                slug: "sejarah-batik".to_string(),
                title: "Sejarah Batik".to_string(),
                thumbnail: String::new(),
                created_at: String::new(),
                category: Category::default(),
            }])
            .await;

        let filters = ArticleFilterArgs {
            search: Some("wayang".to_string()),
            ..Default::default()
        };
        assert!(fetch_articles(&mock, &filters).await.unwrap().is_empty());
    }
}
