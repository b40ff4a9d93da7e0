//! Full lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the view-state
//! reducer end-to-end: every command it emits is built with `TodoApi`,
//! executed over real HTTP using ureq, parsed, and fed back as an outcome
//! event. This validates request building, response parsing, and list
//! reconciliation against the actual server in one pass.

use todo_client::{
    Command, CreateTodo, Event, HttpMethod, HttpRequest, HttpResponse, TodoApi, UpdateTodo,
    ViewState,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the client
/// handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => {
            agent.post(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            agent.put(&req.path).content_type("application/json").send(body.as_bytes())
        }
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

/// Start the mock server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

/// Feed an event the reducer must not answer with a command.
fn apply(state: &mut ViewState, event: Event) {
    assert!(state.update(event).is_none());
}

/// Execute one reducer command over HTTP and feed the outcome back.
fn run_command(api: &TodoApi, state: &mut ViewState, cmd: Command) {
    let event = match cmd {
        Command::Fetch { seq } => match api.parse_list_todos(execute(api.build_list_todos())) {
            Ok(todos) => Event::Fetched { seq, todos },
            Err(_) => Event::FetchFailed { seq },
        },
        Command::Create { title } => {
            let req = api.build_create_todo(&CreateTodo { title }).unwrap();
            match api.parse_create_todo(execute(req)) {
                Ok(todo) => Event::Created(todo),
                Err(_) => Event::CreateFailed,
            }
        }
        Command::Update { seq, id, completed } => {
            let req = api.build_update_todo(id, &UpdateTodo { completed }).unwrap();
            match api.parse_update_todo(execute(req)) {
                Ok(todo) => Event::Updated { seq, todo },
                Err(_) => Event::UpdateFailed { seq, id },
            }
        }
        Command::Delete { seq, id } => {
            let req = api.build_delete_todo(id);
            match api.parse_delete_todo(execute(req)) {
                Ok(()) => Event::Deleted { seq, id },
                Err(_) => Event::DeleteFailed { seq, id },
            }
        }
    };
    let followup = state.update(event);
    assert!(followup.is_none(), "outcome events emit no commands");
}

#[test]
fn lifecycle_through_the_reducer() {
    let api = TodoApi::new(&start_server());

    // Step 1: mount — the initial fetch settles on an empty list.
    let (mut state, cmd) = ViewState::init();
    assert!(state.loading());
    run_command(&api, &mut state, cmd);
    assert!(!state.loading());
    assert!(state.todos().is_empty());
    assert!(state.error().is_none());

    // Step 2: create — the server's todo is appended, the input clears.
    apply(&mut state, Event::InputChanged("Buy milk".to_string()));
    let cmd = state.update(Event::Submit).unwrap();
    run_command(&api, &mut state, cmd);
    assert_eq!(state.todos().len(), 1);
    assert_eq!(state.todos()[0].title, "Buy milk");
    assert!(!state.todos()[0].completed);
    assert_eq!(state.input(), "");
    let id = state.todos()[0].id;

    // Step 3: toggle — the server's completed value is applied.
    let cmd = state.update(Event::Toggle(id)).unwrap();
    run_command(&api, &mut state, cmd);
    assert!(state.todos()[0].completed);

    // Step 4: toggle again — back to the original value.
    let cmd = state.update(Event::Toggle(id)).unwrap();
    run_command(&api, &mut state, cmd);
    assert!(!state.todos()[0].completed);

    // Step 5: a second create lands after the first.
    apply(&mut state, Event::InputChanged("Walk the dog".to_string()));
    let cmd = state.update(Event::Submit).unwrap();
    run_command(&api, &mut state, cmd);
    let titles: Vec<&str> = state.todos().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Buy milk", "Walk the dog"]);

    // Step 6: a refresh returns the same list in the same order.
    let cmd = state.update(Event::Refresh).unwrap();
    run_command(&api, &mut state, cmd);
    let titles: Vec<&str> = state.todos().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Buy milk", "Walk the dog"]);

    // Step 7: delete the first item; exactly one element goes away.
    let cmd = state.update(Event::Delete(id)).unwrap();
    run_command(&api, &mut state, cmd);
    assert_eq!(state.todos().len(), 1);
    assert_eq!(state.todos()[0].title, "Walk the dog");
    assert!(state.error().is_none());
}

#[test]
fn deleting_an_already_deleted_item_is_a_hard_failure() {
    let api = TodoApi::new(&start_server());

    let (mut state, cmd) = ViewState::init();
    run_command(&api, &mut state, cmd);

    apply(&mut state, Event::InputChanged("Ghost".to_string()));
    let cmd = state.update(Event::Submit).unwrap();
    run_command(&api, &mut state, cmd);
    let id = state.todos()[0].id;

    // Another session deletes the item behind the view's back.
    api.parse_delete_todo(execute(api.build_delete_todo(id))).unwrap();

    // The view's own delete now gets a 404: list unchanged, error set.
    let cmd = state.update(Event::Delete(id)).unwrap();
    run_command(&api, &mut state, cmd);
    assert_eq!(state.todos().len(), 1);
    assert_eq!(
        state.error(),
        Some("Failed to delete todo. Please try again.")
    );

    // A manual refresh reconciles and clears the error.
    let cmd = state.update(Event::Refresh).unwrap();
    run_command(&api, &mut state, cmd);
    assert!(state.todos().is_empty());
    assert!(state.error().is_none());
}

#[test]
fn create_rejected_by_the_server_keeps_list_and_pending_input() {
    // No live server needed: the 500 is a synthetic response.
    let api = TodoApi::new("http://localhost:3000");
    let (mut state, _) = ViewState::init();

    apply(&mut state, Event::InputChanged("Buy milk".to_string()));
    let Some(Command::Create { title }) = state.update(Event::Submit) else {
        panic!("expected create");
    };

    let _req = api.build_create_todo(&CreateTodo { title }).unwrap();
    let response = HttpResponse {
        status: 500,
        headers: Vec::new(),
        body: "internal error".to_string(),
    };
    let err = api.parse_create_todo(response).unwrap_err();
    assert_eq!(err.to_string(), "Failed to add todo");

    apply(&mut state, Event::CreateFailed);
    assert!(state.todos().is_empty());
    assert_eq!(state.input(), "Buy milk");
    assert_eq!(state.error(), Some("Failed to add todo. Please try again."));
}
