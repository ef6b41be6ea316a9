//! Explicit view-model for the admin page.
//!
//! The page state lives in [`AdminModel`]. UI events arrive as [`Msg`]
//! values; state changes happen synchronously and side effects leave as
//! [`Command`] values for the driver to execute against the store. The
//! model performs no I/O itself, so every behavior is testable without a
//! network.

use crate::editor::EditorConfig;
use admin_store::models::{NewPost, Post, PostPatch};
use admin_store::slug::derive_slug;

/// Create/Edit toggle. Holding the edited row id inside the variant keeps
/// "edit mode without an id" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Create,
    Edit {
        id: i64,
    },
}

/// The form fields as the user sees them. `cover_image` is a plain string
/// here; it becomes `None` at submit time when left blank.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostForm {
    pub title: String,
    pub author: String,
    pub cover_image: String,
    pub content: String,
}

impl PostForm {
    fn clear(&mut self) {
        *self = Self::default();
    }

    // Title and author are the required inputs; everything else may be blank.
    fn is_submittable(&self) -> bool {
        !self.title.trim().is_empty() && !self.author.trim().is_empty()
    }
}

/// Which store operation an outcome message refers to. Diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Fetch,
    Insert,
    Update,
    Delete,
}

impl StoreOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreOp::Fetch => "fetch",
            StoreOp::Insert => "insert",
            StoreOp::Update => "update",
            StoreOp::Delete => "delete",
        }
    }
}

/// Everything that can happen to the page: user input, user intent, and
/// store outcomes fed back by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    TitleChanged(String),
    AuthorChanged(String),
    CoverImageChanged(String),
    ContentChanged(String),

    Submit,
    BeginEdit(i64),
    Delete(i64),
    Refresh,

    PostsLoaded { seq: u64, posts: Vec<Post> },
    Saved,
    Deleted,
    StoreFailed { op: StoreOp, error: String },
}

/// Effects the driver must execute. The driver reports back with the
/// outcome messages above.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the full list; the response must echo `seq` so stale results
    /// can be rejected.
    Refresh { seq: u64 },
    Insert(NewPost),
    Update { id: i64, patch: PostPatch },
    DeleteRow { id: i64 },
    /// Bring the form back into view when an edit begins.
    ScrollToTop,
}

#[derive(Debug, Clone, Default)]
pub struct AdminModel {
    pub form: PostForm,
    pub posts: Vec<Post>,
    pub mode: Mode,
    pub editor: EditorConfig,
    refresh_seq: u64,
}

impl AdminModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the initial list fetch.
    pub fn start(&mut self) -> Vec<Command> {
        self.refresh()
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Command> {
        match msg {
            Msg::TitleChanged(value) => {
                self.form.title = value;
                vec![]
            }
            Msg::AuthorChanged(value) => {
                self.form.author = value;
                vec![]
            }
            Msg::CoverImageChanged(value) => {
                self.form.cover_image = value;
                vec![]
            }
            Msg::ContentChanged(value) => {
                self.form.content = value;
                vec![]
            }

            Msg::Submit => self.submit(),
            Msg::BeginEdit(id) => self.begin_edit(id),
            Msg::Delete(id) => vec![Command::DeleteRow { id }],
            Msg::Refresh => self.refresh(),

            Msg::PostsLoaded { seq, posts } => {
                if seq == self.refresh_seq {
                    self.posts = posts;
                } else {
                    // A newer fetch is already out; this response lost the race.
                    log::debug!(
                        "Dropping stale post list (seq {} != {})",
                        seq,
                        self.refresh_seq
                    );
                }
                vec![]
            }
            Msg::Saved => {
                // Clear the form and fall back to Create only once the
                // store confirmed the write.
                self.form.clear();
                self.mode = Mode::Create;
                self.refresh()
            }
            Msg::Deleted => self.refresh(),
            Msg::StoreFailed { op, error } => {
                // Logged and swallowed: the form keeps its fields and the
                // list keeps its previous value.
                log::error!("Store {} failed: {}", op.as_str(), error);
                vec![]
            }
        }
    }

    fn refresh(&mut self) -> Vec<Command> {
        self.refresh_seq += 1;
        vec![Command::Refresh {
            seq: self.refresh_seq,
        }]
    }

    fn submit(&mut self) -> Vec<Command> {
        if !self.form.is_submittable() {
            return vec![];
        }

        // Slug is re-derived from the current title on every write.
        let slug = derive_slug(&self.form.title);
        let content = self.editor.clean_markup(&self.form.content);
        let cover_image = non_empty(&self.form.cover_image);

        match self.mode {
            Mode::Create => vec![Command::Insert(NewPost {
                title: self.form.title.clone(),
                author: self.form.author.clone(),
                cover_image,
                content,
                slug,
            })],
            Mode::Edit { id } => vec![Command::Update {
                id,
                patch: PostPatch {
                    title: self.form.title.clone(),
                    author: self.form.author.clone(),
                    cover_image,
                    content,
                    slug,
                },
            }],
        }
    }

    fn begin_edit(&mut self, id: i64) -> Vec<Command> {
        let Some(post) = self.posts.iter().find(|p| p.id == id) else {
            log::debug!("BeginEdit for unknown post id={}", id);
            return vec![];
        };

        self.form.title = post.title.clone();
        self.form.author = post.author.clone();
        self.form.cover_image = post.cover_image.clone().unwrap_or_default();
        self.form.content = post.content.clone();
        self.mode = Mode::Edit { id };

        vec![Command::ScrollToTop]
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: i64, title: &str, author: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            author: author.to_string(),
            cover_image: None,
            content: format!("<p>{title}</p>"),
            slug: derive_slug(title),
            created_at: None,
        }
    }

    fn loaded_model(posts: Vec<Post>) -> AdminModel {
        let mut model = AdminModel::new();
        let commands = model.start();
        let Command::Refresh { seq } = commands[0] else {
            panic!("start() must issue a refresh");
        };
        model.update(Msg::PostsLoaded { seq, posts });
        model
    }

    fn fill_form(model: &mut AdminModel, title: &str, author: &str) {
        model.update(Msg::TitleChanged(title.to_string()));
        model.update(Msg::AuthorChanged(author.to_string()));
    }

    #[test]
    fn create_submit_derives_slug_and_keeps_form_until_saved() {
        let mut model = loaded_model(vec![]);
        fill_form(&mut model, "Hello World", "Jane");

        let commands = model.update(Msg::Submit);
        let [Command::Insert(new_post)] = commands.as_slice() else {
            panic!("expected a single insert, got {commands:?}");
        };
        assert_eq!(new_post.slug, "hello-world");
        assert_eq!(new_post.title, "Hello World");
        assert_eq!(new_post.author, "Jane");

        // Not cleared yet: the write has not been confirmed.
        assert_eq!(model.form.title, "Hello World");

        let commands = model.update(Msg::Saved);
        assert_eq!(model.form, PostForm::default());
        assert_eq!(model.mode, Mode::Create);
        assert!(matches!(commands.as_slice(), [Command::Refresh { .. }]));
    }

    #[test]
    fn submit_requires_title_and_author() {
        let mut model = loaded_model(vec![]);

        model.update(Msg::TitleChanged("Only a title".to_string()));
        assert!(model.update(Msg::Submit).is_empty());

        model.update(Msg::TitleChanged("   ".to_string()));
        model.update(Msg::AuthorChanged("Jane".to_string()));
        assert!(model.update(Msg::Submit).is_empty());
    }

    #[test]
    fn begin_edit_populates_form_and_switches_mode() {
        let mut existing = post(7, "First Post", "Jane");
        existing.cover_image = Some("https://img.example.com/7.png".to_string());
        let mut model = loaded_model(vec![existing.clone()]);

        let commands = model.update(Msg::BeginEdit(7));
        assert_eq!(commands, vec![Command::ScrollToTop]);
        assert_eq!(model.mode, Mode::Edit { id: 7 });
        assert_eq!(model.form.title, existing.title);
        assert_eq!(model.form.author, existing.author);
        assert_eq!(model.form.cover_image, "https://img.example.com/7.png");
        assert_eq!(model.form.content, existing.content);
    }

    #[test]
    fn begin_edit_for_unknown_id_changes_nothing() {
        let mut model = loaded_model(vec![post(1, "A", "B")]);
        let commands = model.update(Msg::BeginEdit(99));
        assert!(commands.is_empty());
        assert_eq!(model.mode, Mode::Create);
        assert_eq!(model.form, PostForm::default());
    }

    #[test]
    fn edit_submit_targets_held_id_and_reverts_to_create() {
        let mut model = loaded_model(vec![post(3, "Old Title", "Jane"), post(4, "Other", "Bob")]);
        model.update(Msg::BeginEdit(3));
        model.update(Msg::TitleChanged("New Title".to_string()));

        let commands = model.update(Msg::Submit);
        let [Command::Update { id, patch }] = commands.as_slice() else {
            panic!("expected a single update, got {commands:?}");
        };
        assert_eq!(*id, 3);
        assert_eq!(patch.title, "New Title");
        // Title edits silently change the slug.
        assert_eq!(patch.slug, "new-title");

        model.update(Msg::Saved);
        assert_eq!(model.mode, Mode::Create);
        assert_eq!(model.form, PostForm::default());
    }

    #[test]
    fn delete_emits_row_delete_then_refreshes() {
        let mut model = loaded_model(vec![post(5, "Doomed", "Jane")]);

        let commands = model.update(Msg::Delete(5));
        assert_eq!(commands, vec![Command::DeleteRow { id: 5 }]);
        // Delete does not touch the mode.
        assert_eq!(model.mode, Mode::Create);

        let commands = model.update(Msg::Deleted);
        assert!(matches!(commands.as_slice(), [Command::Refresh { .. }]));
    }

    #[test]
    fn deleted_id_disappears_after_refresh_roundtrip() {
        let mut model = loaded_model(vec![post(5, "Doomed", "Jane"), post(6, "Stays", "Bob")]);

        model.update(Msg::Delete(5));
        let commands = model.update(Msg::Deleted);
        let Command::Refresh { seq } = commands[0] else {
            panic!("expected refresh");
        };
        model.update(Msg::PostsLoaded {
            seq,
            posts: vec![post(6, "Stays", "Bob")],
        });

        assert_eq!(model.posts.len(), 1);
        assert_eq!(model.posts[0].id, 6);
    }

    #[test]
    fn store_failure_leaves_form_and_list_untouched() {
        let mut model = loaded_model(vec![post(1, "Existing", "Jane")]);
        fill_form(&mut model, "Hello World", "Jane");
        model.update(Msg::Submit);

        let commands = model.update(Msg::StoreFailed {
            op: StoreOp::Insert,
            error: "connection reset".to_string(),
        });

        assert!(commands.is_empty());
        assert_eq!(model.form.title, "Hello World");
        assert_eq!(model.posts.len(), 1);
        assert_eq!(model.mode, Mode::Create);
    }

    #[test]
    fn stale_list_responses_are_dropped() {
        let mut model = AdminModel::new();
        let first = model.start();
        let Command::Refresh { seq: first_seq } = first[0] else {
            panic!("expected refresh");
        };
        let second = model.update(Msg::Refresh);
        let Command::Refresh { seq: second_seq } = second[0] else {
            panic!("expected refresh");
        };
        assert!(second_seq > first_seq);

        // The newer fetch resolves first and wins.
        model.update(Msg::PostsLoaded {
            seq: second_seq,
            posts: vec![post(2, "Fresh", "Jane")],
        });
        // The older response arrives late and must not clobber the list.
        model.update(Msg::PostsLoaded {
            seq: first_seq,
            posts: vec![post(1, "Stale", "Jane")],
        });

        assert_eq!(model.posts.len(), 1);
        assert_eq!(model.posts[0].title, "Fresh");
    }

    #[test]
    fn submit_sanitizes_content_and_blanks_cover_image() {
        let mut model = loaded_model(vec![]);
        fill_form(&mut model, "Hello", "Jane");
        model.update(Msg::ContentChanged(
            "<p>ok</p><script>alert(1)</script>".to_string(),
        ));
        model.update(Msg::CoverImageChanged("   ".to_string()));

        let commands = model.update(Msg::Submit);
        let [Command::Insert(new_post)] = commands.as_slice() else {
            panic!("expected insert");
        };
        assert_eq!(new_post.content, "<p>ok</p>");
        assert_eq!(new_post.cover_image, None);
    }
}
