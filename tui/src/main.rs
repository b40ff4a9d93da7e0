//! Interactive terminal front-end for the todo client.
//!
//! All list logic lives in `todo_client::view`; this binary only translates
//! between the terminal and the reducer. Typed commands become `Event`s,
//! every `Command` the reducer emits is executed over HTTP, and the outcome
//! is fed back before the state is rendered again. Failure causes are
//! logged here; the user only ever sees the reducer's static messages.

mod transport;

use std::io::{self, BufRead, Write};

use todo_client::{Command, CreateTodo, Event, Todo, TodoApi, UpdateTodo, ViewState};

fn main() -> io::Result<()> {
    env_logger::init();

    let base_url =
        std::env::var("TODO_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let api = TodoApi::new(&base_url);
    let agent = transport::agent();

    let (mut state, cmd) = ViewState::init();
    drive(&api, &agent, &mut state, Some(cmd));
    render(&state);

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));

        match verb {
            "" => continue,
            "add" => {
                feed(&api, &agent, &mut state, Event::InputChanged(rest.to_string()));
                feed(&api, &agent, &mut state, Event::Submit);
            }
            "toggle" => match lookup(&state, rest) {
                Some(todo) => feed(&api, &agent, &mut state, Event::Toggle(todo.id)),
                None => {
                    println!("no such item: {rest}");
                    continue;
                }
            },
            "del" => match lookup(&state, rest) {
                Some(todo) => feed(&api, &agent, &mut state, Event::Delete(todo.id)),
                None => {
                    println!("no such item: {rest}");
                    continue;
                }
            },
            "refresh" => feed(&api, &agent, &mut state, Event::Refresh),
            "list" => {}
            "quit" | "exit" => break,
            _ => {
                println!("commands: add <title>, toggle <n>, del <n>, refresh, list, quit");
                continue;
            }
        }
        render(&state);
    }
    Ok(())
}

/// Apply one event, then execute whatever commands the reducer asks for.
fn feed(api: &TodoApi, agent: &ureq::Agent, state: &mut ViewState, event: Event) {
    let next = state.update(event);
    drive(api, agent, state, next);
}

/// Execute commands until the reducer has nothing left to ask for.
fn drive(api: &TodoApi, agent: &ureq::Agent, state: &mut ViewState, mut next: Option<Command>) {
    while let Some(cmd) = next {
        let outcome = perform(api, agent, cmd);
        next = state.update(outcome);
    }
}

/// Execute one command over HTTP and translate the result into the outcome
/// event the reducer expects. Both transport failures and rejected requests
/// land in the same `*Failed` event, with the cause logged for diagnostics.
fn perform(api: &TodoApi, agent: &ureq::Agent, cmd: Command) -> Event {
    match cmd {
        Command::Fetch { seq } => match transport::execute(agent, &api.build_list_todos()) {
            Ok(resp) => match api.parse_list_todos(resp) {
                Ok(todos) => Event::Fetched { seq, todos },
                Err(err) => {
                    log::error!("{err:?}");
                    Event::FetchFailed { seq }
                }
            },
            Err(err) => {
                log::error!("transport: {err}");
                Event::FetchFailed { seq }
            }
        },
        Command::Create { title } => {
            let req = match api.build_create_todo(&CreateTodo { title }) {
                Ok(req) => req,
                Err(err) => {
                    log::error!("{err:?}");
                    return Event::CreateFailed;
                }
            };
            match transport::execute(agent, &req) {
                Ok(resp) => match api.parse_create_todo(resp) {
                    Ok(todo) => Event::Created(todo),
                    Err(err) => {
                        log::error!("{err:?}");
                        Event::CreateFailed
                    }
                },
                Err(err) => {
                    log::error!("transport: {err}");
                    Event::CreateFailed
                }
            }
        }
        Command::Update { seq, id, completed } => {
            let req = match api.build_update_todo(id, &UpdateTodo { completed }) {
                Ok(req) => req,
                Err(err) => {
                    log::error!("{err:?}");
                    return Event::UpdateFailed { seq, id };
                }
            };
            match transport::execute(agent, &req) {
                Ok(resp) => match api.parse_update_todo(resp) {
                    Ok(todo) => Event::Updated { seq, todo },
                    Err(err) => {
                        log::error!("{err:?}");
                        Event::UpdateFailed { seq, id }
                    }
                },
                Err(err) => {
                    log::error!("transport: {err}");
                    Event::UpdateFailed { seq, id }
                }
            }
        }
        Command::Delete { seq, id } => match transport::execute(agent, &api.build_delete_todo(id))
        {
            Ok(resp) => match api.parse_delete_todo(resp) {
                Ok(()) => Event::Deleted { seq, id },
                Err(err) => {
                    log::error!("{err:?}");
                    Event::DeleteFailed { seq, id }
                }
            },
            Err(err) => {
                log::error!("transport: {err}");
                Event::DeleteFailed { seq, id }
            }
        },
    }
}

/// Resolve a 1-based list position to its todo.
fn lookup(state: &ViewState, arg: &str) -> Option<Todo> {
    let n: usize = arg.trim().parse().ok()?;
    state.todos().get(n.checked_sub(1)?).cloned()
}

fn render(state: &ViewState) {
    if state.loading() {
        println!("(loading)");
    }
    if let Some(error) = state.error() {
        println!("! {error}");
    }
    if state.todos().is_empty() && !state.loading() {
        println!("No todos yet.");
        return;
    }
    for (n, todo) in state.todos().iter().enumerate() {
        let mark = if todo.completed { "x" } else { " " };
        println!("{:>3}. [{mark}] {}", n + 1, todo.title);
    }
}
