//! Maintenance wiki service

use serde_json::json;
use validator::Validate;

use super::history::HistoryService;
use crate::{
    error::AppResult,
    models::{
        profile::Session,
        wiki::{CreateWikiSolution, UpdateWikiSolution, WikiQuery, WikiSolution},
    },
    repository::Repository,
};

/// Trimmed, lowercased, de-duplicated tags
fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[derive(Clone)]
pub struct WikiService {
    repository: Repository,
    history: HistoryService,
}

impl WikiService {
    pub fn new(repository: Repository, history: HistoryService) -> Self {
        Self { repository, history }
    }

    pub async fn search(&self, query: &WikiQuery) -> AppResult<Vec<WikiSolution>> {
        self.repository.wiki.search(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<WikiSolution> {
        self.repository.wiki.get_by_id(id).await
    }

    pub async fn create(&self, mut data: CreateWikiSolution, session: &Session) -> AppResult<WikiSolution> {
        data.validate()?;
        data.tags = normalize_tags(&data.tags);
        let solution = self.repository.wiki.create(&data).await?;
        self.history
            .note(session, "create", "wiki_solutions", solution.id, json!({ "title": solution.title }))
            .await;
        Ok(solution)
    }

    pub async fn update(&self, id: i32, mut data: UpdateWikiSolution, session: &Session) -> AppResult<WikiSolution> {
        data.tags = data.tags.as_deref().map(normalize_tags);
        let solution = self.repository.wiki.update(id, &data).await?;
        self.history
            .note(session, "update", "wiki_solutions", id, json!({ "title": solution.title }))
            .await;
        Ok(solution)
    }

    pub async fn delete(&self, id: i32, session: &Session) -> AppResult<()> {
        self.repository.wiki.delete(id).await?;
        self.history.note(session, "delete", "wiki_solutions", id, json!({})).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tags() {
        let tags = vec![" Moedor ".to_string(), "moedor".to_string(), "".to_string(), "Vapor".to_string()];
        assert_eq!(normalize_tags(&tags), vec!["moedor", "vapor"]);
    }
}
