//! Reactive in-memory mirror of the remote todo collection.
//!
//! # Design
//! `TodoStore` pairs a sans-IO `TodoClient` with an injected `Transport` and
//! keeps its state in a `tokio::sync::watch` channel, so consumers can either
//! read the current value or subscribe to changes. Each action issues exactly
//! one request and reconciles local state only from the server's answer;
//! there are never local-only entities.
//!
//! Loading is a count of in-flight bracketed actions rather than a single
//! flag, so overlapping calls keep the store busy until the last one ends.
//!
//! Failure policy differs per action and is deliberate:
//! - `fetch_todos` records the error and swallows it.
//! - paginated/get/create/update/delete/toggle record the error and return it.
//! - `fetch_todo_stats` and `test_connection` are best-effort: they log,
//!   return `None`, and leave loading and error state alone.

use tokio::sync::watch;

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{CreateTodo, PageQuery, StatusFilter, Todo, TodoId, TodoPage, UpdateTodo};

/// Bracketed store actions, each with its fixed user-facing failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FetchTodos,
    FetchPaginatedTodos,
    GetTodo,
    CreateTodo,
    UpdateTodo,
    DeleteTodo,
    ToggleTodo,
}

impl Action {
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::FetchTodos => "Failed to fetch todos",
            Action::FetchPaginatedTodos => "Failed to fetch paginated todos",
            Action::GetTodo => "Failed to fetch todo",
            Action::CreateTodo => "Failed to create todo",
            Action::UpdateTodo => "Failed to update todo",
            Action::DeleteTodo => "Failed to delete todo",
            Action::ToggleTodo => "Failed to toggle todo",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Action::FetchTodos => "fetch_todos",
            Action::FetchPaginatedTodos => "fetch_paginated_todos",
            Action::GetTodo => "get_todo_by_id",
            Action::CreateTodo => "create_todo",
            Action::UpdateTodo => "update_todo",
            Action::DeleteTodo => "delete_todo",
            Action::ToggleTodo => "toggle_todo_complete",
        }
    }
}

/// Everything the store knows, as one observable value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    todos: Vec<Todo>,
    in_flight: usize,
    error: Option<String>,
    stats: Option<serde_json::Value>,
}

impl StoreState {
    /// Collection in server response order.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn stats(&self) -> Option<&serde_json::Value> {
        self.stats.as_ref()
    }

    pub fn completed_todos(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| t.completed).collect()
    }

    pub fn incomplete_todos(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| !t.completed).collect()
    }

    pub fn todo_count(&self) -> usize {
        self.todos.len()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.completed).count()
    }

    /// Replace the first entry whose id is `id`. Returns false when absent.
    fn replace(&mut self, id: TodoId, todo: Todo) -> bool {
        match self.todos.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, id: TodoId) {
        self.todos.retain(|t| t.id != id);
    }
}

/// Decrements the in-flight count on every exit path of an action.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<StoreState>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(state: &'a watch::Sender<StoreState>) -> Self {
        state.send_modify(|s| s.in_flight += 1);
        Self { state }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .send_modify(|s| s.in_flight = s.in_flight.saturating_sub(1));
    }
}

pub struct TodoStore<T> {
    client: TodoClient,
    transport: T,
    state: watch::Sender<StoreState>,
}

impl TodoStore<ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config, ReqwestTransport::new())
    }
}

impl<T: Transport> TodoStore<T> {
    pub fn new(config: &ClientConfig, transport: T) -> Self {
        Self::with_client(TodoClient::new(&config.api_base_url()), transport)
    }

    pub fn with_client(client: TodoClient, transport: T) -> Self {
        let (state, _) = watch::channel(StoreState::default());
        Self {
            client,
            transport,
            state,
        }
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    pub fn todos(&self) -> Vec<Todo> {
        self.state.borrow().todos.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn stats(&self) -> Option<serde_json::Value> {
        self.state.borrow().stats.clone()
    }

    pub fn completed_todos(&self) -> Vec<Todo> {
        self.state.borrow().completed_todos().into_iter().cloned().collect()
    }

    pub fn incomplete_todos(&self) -> Vec<Todo> {
        self.state.borrow().incomplete_todos().into_iter().cloned().collect()
    }

    pub fn todo_count(&self) -> usize {
        self.state.borrow().todo_count()
    }

    pub fn completed_count(&self) -> usize {
        self.state.borrow().completed_count()
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(|s| s.error.take().is_some());
    }

    /// Replace the collection with the server's list. Failures only surface
    /// through [`error`](Self::error).
    pub async fn fetch_todos(&self, status: Option<StatusFilter>) {
        let request = self.client.build_list_todos(status);
        // the failure is already recorded in the error state
        let _ = self
            .tracked(Action::FetchTodos, Ok(request), |response| {
                let todos = self.client.parse_list_todos(response)?;
                self.state.send_modify(|s| s.todos = todos);
                Ok(())
            })
            .await;
    }

    pub async fn fetch_todo_stats(&self) -> Option<serde_json::Value> {
        let request = self.client.build_todo_stats();
        let outcome: Result<serde_json::Value, ApiError> = async {
            let response = self.transport.execute(request).await?;
            self.client.parse_todo_stats(response)
        }
        .await;

        match outcome {
            Ok(stats) => {
                self.state.send_modify(|s| s.stats = Some(stats.clone()));
                Some(stats)
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching todo stats");
                None
            }
        }
    }

    /// One page of todos. The primary collection is not touched.
    pub async fn fetch_paginated_todos(&self, query: PageQuery) -> Result<TodoPage, ApiError> {
        let request = self.client.build_paginated_todos(query);
        self.tracked(Action::FetchPaginatedTodos, Ok(request), |response| {
            self.client.parse_paginated_todos(response)
        })
        .await
    }

    pub async fn get_todo_by_id(&self, id: TodoId) -> Result<Todo, ApiError> {
        let request = self.client.build_get_todo(id);
        self.tracked(Action::GetTodo, Ok(request), |response| {
            self.client.parse_get_todo(response)
        })
        .await
    }

    pub async fn create_todo(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_create_todo(input);
        self.tracked(Action::CreateTodo, request, |response| {
            let todo = self.client.parse_create_todo(response)?;
            self.state.send_modify(|s| s.todos.push(todo.clone()));
            Ok(todo)
        })
        .await
    }

    /// Update remotely, then replace the local entry with matching `id`. An
    /// absent local entry is left absent.
    pub async fn update_todo(&self, id: TodoId, input: &UpdateTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, input);
        self.tracked(Action::UpdateTodo, request, |response| {
            let todo = self.client.parse_update_todo(response)?;
            self.reconcile(id, &todo);
            Ok(todo)
        })
        .await
    }

    pub async fn delete_todo(&self, id: TodoId) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        self.tracked(Action::DeleteTodo, Ok(request), |response| {
            self.client.parse_delete_todo(response)?;
            self.state.send_modify(|s| s.remove(id));
            Ok(())
        })
        .await
    }

    pub async fn toggle_todo_complete(&self, id: TodoId) -> Result<Todo, ApiError> {
        let request = self.client.build_toggle_todo(id);
        self.tracked(Action::ToggleTodo, Ok(request), |response| {
            let todo = self.client.parse_toggle_todo(response)?;
            self.reconcile(id, &todo);
            Ok(todo)
        })
        .await
    }

    /// Health probe. `None` on any failure.
    pub async fn test_connection(&self) -> Option<serde_json::Value> {
        let request = self.client.build_test_connection();
        let outcome: Result<serde_json::Value, ApiError> = async {
            let response = self.transport.execute(request).await?;
            self.client.parse_test_connection(response)
        }
        .await;

        outcome
            .map_err(|err| tracing::error!(error = %err, "error testing connection"))
            .ok()
    }

    fn reconcile(&self, id: TodoId, todo: &Todo) {
        self.state.send_if_modified(|s| s.replace(id, todo.clone()));
    }

    /// Loading bracket shared by every non-best-effort action.
    async fn tracked<R>(
        &self,
        action: Action,
        request: Result<HttpRequest, ApiError>,
        handle: impl FnOnce(HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let _loading = LoadingGuard::begin(&self.state);
        self.clear_error();

        let outcome: Result<R, ApiError> = async {
            let response = self.transport.execute(request?).await?;
            handle(response)
        }
        .await;

        if let Err(err) = &outcome {
            tracing::error!(action = action.name(), error = %err, "{}", action.failure_message());
            self.state
                .send_modify(|s| s.error = Some(action.failure_message().to_string()));
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Semaphore;

    use super::*;
    use crate::http::HttpMethod;

    /// Replays queued responses in order and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn reply(self, status: u16, body: serde_json::Value) -> Self {
            self.responses.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            self
        }

        fn fail(self) -> Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(ApiError::Transport("connection refused".to_string())));
            self
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
        }
    }

    fn store(transport: ScriptedTransport) -> TodoStore<Arc<ScriptedTransport>> {
        TodoStore::new(&ClientConfig::default(), Arc::new(transport))
    }

    fn todo(id: TodoId, title: &str, completed: bool) -> serde_json::Value {
        json!({"id": id, "title": title, "completed": completed})
    }

    fn seeded(transport: ScriptedTransport) -> ScriptedTransport {
        transport.reply(
            200,
            json!({"data": [todo(1, "one", false), todo(2, "two", true)]}),
        )
    }

    #[tokio::test]
    async fn derived_counts_follow_collection() {
        let store = store(seeded(ScriptedTransport::default()));
        store.fetch_todos(None).await;

        assert_eq!(store.completed_count(), 1);
        assert_eq!(store.todo_count(), 2);
        assert_eq!(store.incomplete_todos()[0].id, 1);
        assert_eq!(store.completed_todos()[0].id, 2);
        assert_eq!(
            store.completed_count() + store.incomplete_todos().len(),
            store.todo_count()
        );
    }

    #[tokio::test]
    async fn create_then_toggle_reconciles_in_place() {
        let transport = ScriptedTransport::default()
            .reply(201, json!({"data": todo(3, "x", false)}))
            .reply(200, json!({"data": todo(3, "x", true)}));
        let store = store(transport);

        let created = store.create_todo(&CreateTodo::new("x")).await.unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(store.todo_count(), 1);

        let toggled = store.toggle_todo_complete(3).await.unwrap();
        assert!(toggled.completed);
        assert_eq!(store.todo_count(), 1);
        assert!(store.todos()[0].completed);
    }

    #[tokio::test]
    async fn toggle_sends_patch_without_body() {
        let transport = Arc::new(
            ScriptedTransport::default().reply(200, json!({"data": todo(3, "x", true)})),
        );
        let store = TodoStore::new(&ClientConfig::default(), transport.clone());
        store.toggle_todo_complete(3).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Patch);
        assert!(requests[0].path.ends_with("/api/todos/3/toggle"));
        assert!(requests[0].body.is_none());
    }

    #[tokio::test]
    async fn creates_append_one_each_with_unique_ids() {
        let transport = ScriptedTransport::default()
            .reply(201, json!({"data": todo(1, "a", false)}))
            .reply(201, json!({"data": todo(2, "b", false)}))
            .reply(201, json!({"data": todo(3, "c", false)}));
        let store = store(transport);

        for (expected, title) in ["a", "b", "c"].into_iter().enumerate() {
            store.create_todo(&CreateTodo::new(title)).await.unwrap();
            assert_eq!(store.todo_count(), expected + 1);
        }
        let ids: BTreeSet<_> = store.todos().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), store.todo_count());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_collection_and_sets_error() {
        let store = store(seeded(ScriptedTransport::default()).fail());
        store.fetch_todos(None).await;
        let before = store.todos();

        store.fetch_todos(None).await;

        assert_eq!(store.todos(), before);
        assert_eq!(store.error().as_deref(), Some("Failed to fetch todos"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn fetch_with_status_sends_query_and_replaces() {
        let transport = Arc::new(
            seeded(ScriptedTransport::default())
                .reply(200, json!({"data": [todo(2, "two", true)]})),
        );
        let store = TodoStore::new(&ClientConfig::default(), transport.clone());
        store.fetch_todos(None).await;
        store.fetch_todos(Some(StatusFilter::Completed)).await;

        assert!(store.todos().iter().all(|t| t.completed));
        assert_eq!(store.todo_count(), 1);
        let requests = transport.requests();
        assert_eq!(requests[0].query_param("status"), None);
        assert_eq!(requests[1].query_param("status"), Some("completed"));
    }

    #[tokio::test]
    async fn update_replaces_matching_entry_idempotently() {
        let updated = json!({"data": {"id": 1, "title": "renamed", "completed": false}});
        let transport = seeded(ScriptedTransport::default())
            .reply(200, updated.clone())
            .reply(200, updated);
        let store = store(transport);
        store.fetch_todos(None).await;

        let input = UpdateTodo {
            title: Some("renamed".to_string()),
            ..UpdateTodo::default()
        };
        let returned = store.update_todo(1, &input).await.unwrap();
        let after_first = store.todos();
        assert_eq!(after_first[0], returned);
        assert_eq!(after_first[1].id, 2);

        store.update_todo(1, &input).await.unwrap();
        assert_eq!(store.todos(), after_first);
    }

    #[tokio::test]
    async fn update_of_absent_entry_is_dropped_locally() {
        let transport = seeded(ScriptedTransport::default())
            .reply(200, json!({"data": todo(99, "remote only", true)}));
        let store = store(transport);
        store.fetch_todos(None).await;
        let before = store.todos();

        let returned = store
            .update_todo(99, &UpdateTodo::default())
            .await
            .unwrap();
        assert_eq!(returned.id, 99);
        assert_eq!(store.todos(), before);
    }

    #[tokio::test]
    async fn delete_removes_and_repeats_harmlessly() {
        let transport = seeded(ScriptedTransport::default())
            .reply(204, json!(null))
            .reply(204, json!(null));
        let store = store(transport);
        store.fetch_todos(None).await;

        store.delete_todo(1).await.unwrap();
        assert!(store.todos().iter().all(|t| t.id != 1));
        let after_first = store.todos();

        store.delete_todo(1).await.unwrap();
        assert_eq!(store.todos(), after_first);
    }

    #[tokio::test]
    async fn failed_delete_returns_error_and_keeps_entry() {
        let transport = seeded(ScriptedTransport::default()).reply(500, json!({"error": "boom"}));
        let store = store(transport);
        store.fetch_todos(None).await;

        let err = store.delete_todo(1).await.unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
        assert_eq!(store.todo_count(), 2);
        assert_eq!(store.error().as_deref(), Some("Failed to delete todo"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn failed_create_leaves_collection_unchanged() {
        let store = store(ScriptedTransport::default().fail());
        let err = store.create_todo(&CreateTodo::new("x")).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(store.todo_count(), 0);
        assert_eq!(store.error().as_deref(), Some("Failed to create todo"));
    }

    #[tokio::test]
    async fn failure_messages_are_fixed_per_action() {
        let transport = ScriptedTransport::default()
            .fail()
            .fail()
            .fail()
            .reply(404, json!(null));
        let store = store(transport);

        assert!(store.fetch_paginated_todos(PageQuery::default()).await.is_err());
        assert_eq!(store.error().as_deref(), Some("Failed to fetch paginated todos"));

        assert!(store.update_todo(1, &UpdateTodo::default()).await.is_err());
        assert_eq!(store.error().as_deref(), Some("Failed to update todo"));

        assert!(store.toggle_todo_complete(1).await.is_err());
        assert_eq!(store.error().as_deref(), Some("Failed to toggle todo"));

        let err = store.get_todo_by_id(1).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        assert_eq!(store.error().as_deref(), Some("Failed to fetch todo"));
    }

    #[tokio::test]
    async fn next_action_clears_previous_error() {
        let transport = ScriptedTransport::default()
            .fail()
            .reply(200, json!({"data": todo(5, "five", false)}));
        let store = store(transport);

        store.fetch_todos(None).await;
        assert!(store.error().is_some());

        let fetched = store.get_todo_by_id(5).await.unwrap();
        assert_eq!(fetched.id, 5);
        assert!(store.error().is_none());
        assert_eq!(store.todo_count(), 0);
    }

    #[tokio::test]
    async fn clear_error_only_resets_error() {
        let store = store(seeded(ScriptedTransport::default()).fail());
        store.fetch_todos(None).await;
        store.fetch_todos(None).await;

        store.clear_error();
        assert!(store.error().is_none());
        assert_eq!(store.todo_count(), 2);
    }

    #[tokio::test]
    async fn paginated_fetch_leaves_collection_alone() {
        let transport = Arc::new(seeded(ScriptedTransport::default()).reply(
            200,
            json!({
                "data": [todo(7, "seven", false)],
                "pagination": {"page": 2, "limit": 1, "total": 3, "totalPages": 3}
            }),
        ));
        let store = TodoStore::new(&ClientConfig::default(), transport.clone());
        store.fetch_todos(None).await;

        let page = store
            .fetch_paginated_todos(PageQuery {
                page: 2,
                limit: 1,
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(page.todos[0].id, 7);
        assert_eq!(page.pagination["total"], 3);
        assert_eq!(store.todo_count(), 2);

        let request = &transport.requests()[1];
        assert_eq!(request.query_param("page"), Some("2"));
        assert_eq!(request.query_param("limit"), Some("1"));
    }

    #[tokio::test]
    async fn stats_are_stored_and_returned() {
        let body = json!({"data": {"total": 2, "completed": 1, "pending": 1}});
        let store = store(ScriptedTransport::default().reply(200, body.clone()));

        let stats = store.fetch_todo_stats().await;
        assert_eq!(stats.as_ref(), Some(&body));
        assert_eq!(store.stats(), Some(body));
    }

    #[tokio::test]
    async fn failed_stats_do_not_touch_error_or_loading() {
        let store = store(ScriptedTransport::default().fail().fail());
        store.fetch_todos(None).await;

        assert!(store.fetch_todo_stats().await.is_none());
        assert_eq!(store.error().as_deref(), Some("Failed to fetch todos"));
        assert!(store.stats().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_connection_is_best_effort() {
        let transport = ScriptedTransport::default()
            .fail()
            .reply(200, json!({"message": "API is working"}))
            .reply(503, json!(null));
        let store = store(transport);
        store.fetch_todos(None).await;
        let mut rx = store.subscribe();

        let health = store.test_connection().await.unwrap();
        assert_eq!(health["message"], "API is working");
        assert!(store.test_connection().await.is_none());

        assert_eq!(store.error().as_deref(), Some("Failed to fetch todos"));
        assert!(!rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_loading());
    }

    #[tokio::test]
    async fn with_client_keeps_given_base_url() {
        let client = TodoClient::new("http://todo.internal/api/todos/");
        let store = TodoStore::with_client(client, Arc::new(ScriptedTransport::default()));
        assert_eq!(store.client().base_url(), "http://todo.internal/api/todos");
    }

    #[tokio::test]
    async fn subscribers_see_reconciled_state() {
        let transport =
            ScriptedTransport::default().reply(201, json!({"data": todo(1, "a", false)}));
        let store = store(transport);
        let mut rx = store.subscribe();

        store.create_todo(&CreateTodo::new("a")).await.unwrap();

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update();
        assert_eq!(state.todo_count(), 1);
        assert!(!state.is_loading());
    }

    /// Holds every request until a permit is released.
    struct GatedTransport {
        gate: Semaphore,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            let permit = self
                .gate
                .acquire()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            permit.forget();
            let id = request.path.rsplit('/').next().unwrap_or_default().to_string();
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: json!({"data": todo(id.parse().unwrap(), "t", false)}).to_string(),
            })
        }
    }

    #[tokio::test]
    async fn overlapping_actions_stay_loading_until_last_finishes() {
        let transport = Arc::new(GatedTransport {
            gate: Semaphore::new(0),
        });
        let store = Arc::new(TodoStore::new(&ClientConfig::default(), transport.clone()));

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.get_todo_by_id(1).await }
        });
        tokio::task::yield_now().await;
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.get_todo_by_id(2).await }
        });
        tokio::task::yield_now().await;
        assert!(store.is_loading());

        transport.gate.add_permits(1);
        assert_eq!(first.await.unwrap().unwrap().id, 1);
        assert!(store.is_loading());

        transport.gate.add_permits(1);
        assert_eq!(second.await.unwrap().unwrap().id, 2);
        assert!(!store.is_loading());
    }
}
