//! News feed and comment use cases.
//!
//! # Invariants
//! - The home page shows at most `page_size` news items, newest first.
//! - Comment threads render oldest first.
//! - The comment form is offered to authenticated viewers only.
//! - Only a comment's author can load its edit/delete pages or mutate it.

use super::{ServiceError, ServiceResult, Submission};
use crate::forms::{CommentForm, CommentInput};
use crate::model::news::{
    Comment, CommentId, NewComment, NewNews, News, NewsId, NewsRecord, NEWS_TITLE_MAX_CHARS,
};
use crate::model::user::User;
use crate::repo::news_repo::NewsRepository;
use log::{debug, info};
use serde::Serialize;

/// Home page size used when no setting overrides it.
pub const NEWS_COUNT_ON_HOME_PAGE: u32 = 10;

/// Context of the news home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeContext {
    pub object_list: Vec<NewsRecord>,
    pub page: u32,
    pub page_count: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

/// Context of a news item page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailContext {
    pub news: News,
    pub comments: Vec<Comment>,
    /// `None` for anonymous viewers.
    pub form: Option<CommentForm>,
}

/// Context of the comment edit page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentEditContext {
    pub comment: Comment,
    pub form: CommentForm,
}

/// Context of the comment delete confirmation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentDeleteContext {
    pub comment: Comment,
}

/// News service facade over repository implementations.
pub struct NewsService<R: NewsRepository> {
    repo: R,
    page_size: u32,
}

impl<R: NewsRepository> NewsService<R> {
    /// Creates a service with the default home page size.
    pub fn new(repo: R) -> Self {
        Self::with_page_size(repo, NEWS_COUNT_ON_HOME_PAGE)
    }

    /// Creates a service with a custom home page size (minimum 1).
    pub fn with_page_size(repo: R, page_size: u32) -> Self {
        Self {
            repo,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Publishes a news item. Titles must be 1 to 50 characters.
    pub fn publish(&self, news: &NewNews) -> ServiceResult<News> {
        let title_chars = news.title.trim().chars().count();
        if title_chars == 0 || title_chars > NEWS_TITLE_MAX_CHARS {
            return Err(ServiceError::InvalidInput(format!(
                "news title must be 1..={NEWS_TITLE_MAX_CHARS} characters, got {title_chars}"
            )));
        }
        let id = self.repo.create_news(news)?;
        info!("event=news_publish module=news status=ok news_id={id}");
        self.get_news(id)
    }

    /// Builds the home page for a 1-based page number.
    ///
    /// Page 1 always exists, even when the feed is empty; any other page past
    /// the end is `NotFound`.
    pub fn home(&self, page: u32) -> ServiceResult<HomeContext> {
        let page = page.max(1);
        let total = self.repo.count_news()?;
        let page_count = u32::try_from(total.div_ceil(u64::from(self.page_size)))
            .unwrap_or(u32::MAX)
            .max(1);
        if page > page_count {
            return Err(ServiceError::not_found("page", page));
        }

        let offset = (page - 1).saturating_mul(self.page_size);
        let object_list = self.repo.list_news(self.page_size, offset)?;
        Ok(HomeContext {
            object_list,
            page,
            page_count,
            has_previous: page > 1,
            has_next: page < page_count,
        })
    }

    /// Builds a news item page with its comment thread.
    pub fn detail(&self, news_id: NewsId, viewer: Option<&User>) -> ServiceResult<DetailContext> {
        let news = self.get_news(news_id)?;
        let comments = self.repo.list_comments(news_id)?;
        Ok(DetailContext {
            news,
            comments,
            form: viewer.map(|_| CommentForm::blank()),
        })
    }

    /// Adds a comment by `author` under a news item.
    pub fn add_comment(
        &self,
        news_id: NewsId,
        author: &User,
        input: &CommentInput,
    ) -> ServiceResult<Submission<Comment, DetailContext>> {
        let news = self.get_news(news_id)?;
        let text = match CommentForm::clean(input) {
            Ok(text) => text,
            Err(form) => {
                debug!("event=comment_create module=news status=rejected news_id={news_id}");
                let comments = self.repo.list_comments(news_id)?;
                return Ok(Submission::Rejected(DetailContext {
                    news,
                    comments,
                    form: Some(form),
                }));
            }
        };

        let comment_id = self
            .repo
            .create_comment(&NewComment::new(news_id, author.id, text))?;
        info!(
            "event=comment_create module=news status=ok news_id={news_id} comment_id={comment_id} author_id={}",
            author.id
        );
        self.get_comment(comment_id).map(Submission::Accepted)
    }

    pub fn edit_comment_form(
        &self,
        comment_id: CommentId,
        user: &User,
    ) -> ServiceResult<CommentEditContext> {
        let comment = self.owned_comment(comment_id, user)?;
        Ok(CommentEditContext {
            form: CommentForm::for_comment(&comment),
            comment,
        })
    }

    /// Replaces the text of a comment owned by `user`.
    pub fn edit_comment(
        &self,
        comment_id: CommentId,
        user: &User,
        input: &CommentInput,
    ) -> ServiceResult<Submission<Comment, CommentEditContext>> {
        let comment = self.owned_comment(comment_id, user)?;
        let text = match CommentForm::clean(input) {
            Ok(text) => text,
            Err(form) => return Ok(Submission::Rejected(CommentEditContext { comment, form })),
        };

        self.repo.update_comment_text(comment_id, &text)?;
        info!("event=comment_update module=news status=ok comment_id={comment_id}");
        self.get_comment(comment_id).map(Submission::Accepted)
    }

    pub fn delete_comment_form(
        &self,
        comment_id: CommentId,
        user: &User,
    ) -> ServiceResult<CommentDeleteContext> {
        let comment = self.owned_comment(comment_id, user)?;
        Ok(CommentDeleteContext { comment })
    }

    /// Deletes a comment owned by `user` and returns the removed row.
    pub fn delete_comment(&self, comment_id: CommentId, user: &User) -> ServiceResult<Comment> {
        let comment = self.owned_comment(comment_id, user)?;
        self.repo.delete_comment(comment_id)?;
        info!(
            "event=comment_delete module=news status=ok comment_id={comment_id} news_id={}",
            comment.news_id
        );
        Ok(comment)
    }

    fn get_news(&self, news_id: NewsId) -> ServiceResult<News> {
        self.repo
            .get_news(news_id)?
            .ok_or_else(|| ServiceError::not_found("news", news_id))
    }

    fn get_comment(&self, comment_id: CommentId) -> ServiceResult<Comment> {
        self.repo
            .get_comment(comment_id)?
            .ok_or_else(|| ServiceError::not_found("comment", comment_id))
    }

    fn owned_comment(&self, comment_id: CommentId, user: &User) -> ServiceResult<Comment> {
        let comment = self.get_comment(comment_id)?;
        if comment.author_id != user.id {
            debug!(
                "event=comment_access module=news status=denied comment_id={comment_id} user_id={}",
                user.id
            );
            return Err(ServiceError::not_found("comment", comment_id));
        }
        Ok(comment)
    }
}
