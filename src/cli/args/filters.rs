//! Filter argument types for list commands
//!
//! Filtering happens client-side: the list endpoints return everything.

use clap::Args;

use crate::client::models::{ArticleSummary, Payout, PayoutStatus, QuizLevel, QuizSummary};

/// Filters for `article list`
#[derive(Args, Debug, Default, Clone)]
pub struct ArticleFilterArgs {
    /// Filter by category (uuid or name)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Search title, slug and category name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl ArticleFilterArgs {
    /// Filter, then order newest first
    pub fn apply(&self, articles: Vec<ArticleSummary>) -> Vec<ArticleSummary> {
        let mut articles: Vec<_> = articles
            .into_iter()
            .filter(|a| {
                self.category
                    .as_deref()
                    .is_none_or(|c| a.category.matches(c))
            })
            .filter(|a| self.search.as_deref().is_none_or(|q| a.matches_search(q)))
            .collect();

        articles.sort_by(|a, b| b.created_at_utc().cmp(&a.created_at_utc()));
        truncate(articles, self.limit)
    }
}

/// Filters for `quiz list`
#[derive(Args, Debug, Default, Clone)]
pub struct QuizFilterArgs {
    /// Filter by category (uuid or name)
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Filter by level (beginner, intermediate, advanced)
    #[arg(long, short = 'l')]
    pub level: Option<QuizLevel>,

    /// Search title, slug and category name
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl QuizFilterArgs {
    pub fn apply(&self, quizzes: Vec<QuizSummary>) -> Vec<QuizSummary> {
        let quizzes = quizzes
            .into_iter()
            .filter(|q| {
                self.category
                    .as_deref()
                    .is_none_or(|c| q.category.matches(c))
            })
            .filter(|q| self.level.is_none_or(|l| q.level == l))
            .filter(|q| self.search.as_deref().is_none_or(|s| q.matches_search(s)))
            .collect();
        truncate(quizzes, self.limit)
    }
}

/// Filters for `payout list`
#[derive(Args, Debug, Default, Clone)]
pub struct PayoutFilterArgs {
    /// Filter by status (pending, completed, failed)
    #[arg(long)]
    pub status: Option<PayoutStatus>,

    /// Search seller name, email, bank account name and number
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl PayoutFilterArgs {
    /// Filter, then order pending first and newest first within a group
    pub fn apply(&self, payouts: Vec<Payout>) -> Vec<Payout> {
        let mut payouts: Vec<_> = payouts
            .into_iter()
            .filter(|p| self.status.is_none_or(|s| p.status == s))
            .filter(|p| self.search.as_deref().is_none_or(|q| p.matches_search(q)))
            .collect();

        payouts.sort_by(Payout::review_order);
        truncate(payouts, self.limit)
    }
}

fn truncate<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}
