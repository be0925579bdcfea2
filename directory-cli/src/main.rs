use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use directory_client::{
    DEFAULT_PER_PAGE, DirectoryClientError, HttpClient, ListController, ListSession,
    ListUsersRequest, Navigation, PAGE_SIZE_OPTIONS, SortKey, SortOrder, SortState, User,
    UsersPage, format_registration_date, page_summary, range_summary, sort_users,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const DEFAULT_HTTP_SERVER: &str = "http://127.0.0.1:8080";
const SERVER_ENV: &str = "DIRECTORY_HTTP_URL";

#[derive(Debug, Parser)]
#[command(
    name = "directory-cli",
    version,
    about = "CLI клиент для каталога пользователей directory-server"
)]
struct Cli {
    /// Адрес HTTP-сервера (по умолчанию DIRECTORY_HTTP_URL или http://127.0.0.1:8080).
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Одна страница пользователей.
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        limit: u64,
        #[arg(long)]
        search: Option<String>,
        /// Колонка сортировки на клиенте: id, name, email, created-at.
        #[arg(long, default_value = "id")]
        sort: SortKey,
        #[arg(long, value_enum, default_value = "asc")]
        order: OrderArg,
    },
    /// Интерактивный просмотр (команды читаются из stdin).
    Browse {
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        limit: u64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Navigate(Navigation),
    GoTo(String),
    Sort(SortKey),
    PageSize(u64),
    Search(String),
    ClearSearch,
    Help,
    Quit,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .compact()
        .init();

    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let server = resolve_server(cli.server, std::env::var(SERVER_ENV).ok());

    match cli.command {
        Command::List {
            page,
            limit,
            search,
            sort,
            order,
        } => {
            let client = HttpClient::new(server).context("не удалось создать HTTP-клиент")?;
            let request = ListUsersRequest::new(page, limit, search.as_deref().unwrap_or(""));
            let page = client
                .list_users(&request)
                .await
                .map_err(map_client_error)?;
            let sort = SortState {
                key: sort,
                order: order.into(),
            };
            print!("{}", render_page(&page, sort));
        }
        Command::Browse { limit } => browse(server, limit).await?,
    }

    Ok(())
}

async fn browse(server: String, limit: u64) -> Result<()> {
    let session = ListSession::new(server).context("не удалось создать HTTP-клиент")?;
    let mut updates = session.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_help();
    session.mount().await;
    if limit != DEFAULT_PER_PAGE {
        session.set_per_page(limit).await;
    }

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = session.snapshot().await;
                print!("{}", render_state(&state));
            }
            line = lines.next_line() => {
                let Some(line) = line.context("не удалось прочитать stdin")? else {
                    break;
                };
                match parse_browse_command(&line) {
                    Some(BrowseCommand::Quit) => break,
                    Some(BrowseCommand::Help) => print_help(),
                    Some(command) => apply_browse_command(&session, command).await,
                    None => println!("Неизвестная команда, h — справка"),
                }
            }
        }
    }

    Ok(())
}

async fn apply_browse_command(session: &ListSession, command: BrowseCommand) {
    let issued = match command {
        BrowseCommand::Navigate(navigation) => session.navigate(navigation).await,
        BrowseCommand::GoTo(text) => {
            // Ошибка ввода показывается под таблицей после перерисовки.
            session.go_to_page(&text).await;
            true
        }
        BrowseCommand::Sort(key) => {
            session.toggle_sort(key).await;
            true
        }
        BrowseCommand::PageSize(size) => session.set_per_page(size).await,
        BrowseCommand::Search(term) => {
            session.type_search(&term).await;
            true
        }
        BrowseCommand::ClearSearch => {
            session.clear_search().await;
            true
        }
        BrowseCommand::Help | BrowseCommand::Quit => true,
    };
    if !issued {
        println!("Нет такой страницы");
    }
}

fn parse_browse_command(line: &str) -> Option<BrowseCommand> {
    let line = line.trim();
    if let Some(term) = line.strip_prefix('/') {
        if term.is_empty() {
            return Some(BrowseCommand::ClearSearch);
        }
        return Some(BrowseCommand::Search(term.to_string()));
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match (head, rest) {
        ("n", "") => BrowseCommand::Navigate(Navigation::Next),
        ("p", "") => BrowseCommand::Navigate(Navigation::Previous),
        ("f", "") => BrowseCommand::Navigate(Navigation::First),
        ("l", "") => BrowseCommand::Navigate(Navigation::Last),
        ("q", "") => BrowseCommand::Quit,
        ("h", "") => BrowseCommand::Help,
        ("g", text) => BrowseCommand::GoTo(text.to_string()),
        ("s", key) => BrowseCommand::Sort(key.parse().ok()?),
        ("size", size) => {
            let size = size.parse().ok()?;
            if !PAGE_SIZE_OPTIONS.contains(&size) {
                return None;
            }
            BrowseCommand::PageSize(size)
        }
        (number, "") => BrowseCommand::Navigate(Navigation::Page(number.parse().ok()?)),
        _ => return None,
    };
    Some(command)
}

fn resolve_server(flag: Option<String>, env: Option<String>) -> String {
    let raw = flag
        .or(env)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HTTP_SERVER.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: DirectoryClientError) -> anyhow::Error {
    let message = match err {
        DirectoryClientError::Validation(errors) => {
            let mut message = "сервер отклонил параметры:".to_string();
            for (field, messages) in errors {
                for text in messages {
                    message.push_str(&format!("\n  {field}: {text}"));
                }
            }
            message
        }
        DirectoryClientError::NotFound => "ресурс не найден".to_string(),
        DirectoryClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        DirectoryClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow::anyhow!(message)
}

fn print_help() {
    println!("Команды:");
    println!("  n / p / f / l   следующая / предыдущая / первая / последняя страница");
    println!("  <число>         страница из окна навигации");
    println!("  g <число>       перейти к странице");
    println!("  s <колонка>     сортировка: id, name, email, created-at");
    println!("  size <n>        размер страницы: 10, 25, 50, 100");
    println!("  /<текст>        поиск, / — очистить");
    println!("  h               справка");
    println!("  q               выход");
}

fn render_page(page: &UsersPage, sort: SortState) -> String {
    let mut out = render_table(&sort_users(&page.data, sort), sort);
    out.push_str(&format!(
        "{}\n{}\n",
        page_summary(&page.meta),
        range_summary(&page.meta)
    ));
    out
}

fn render_state(state: &ListController) -> String {
    let mut out = String::new();
    if !state.search_term().is_empty() {
        out.push_str(&format!("Поиск: {}\n", state.search_term()));
    }
    out.push_str(&render_table(&state.sorted_users(), state.sort()));

    let window = state
        .page_window()
        .into_iter()
        .map(|page| {
            if page == state.meta().current_page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    out.push_str(&format!(
        "{}  |  {}  |  {}  |  по {} на странице\n",
        page_summary(state.meta()),
        range_summary(state.meta()),
        window,
        state.per_page()
    ));
    if let Some(error) = state.go_to_page_error() {
        out.push_str(&format!("{error}\n"));
    }
    out
}

fn render_table(users: &[User], sort: SortState) -> String {
    let header = |key: SortKey, title: &str| {
        if sort.key != key {
            return title.to_string();
        }
        match sort.order {
            SortOrder::Asc => format!("{title} ^"),
            SortOrder::Desc => format!("{title} v"),
        }
    };

    let mut out = format!(
        "{:<8} {:<24} {:<32} {}\n",
        header(SortKey::Id, "ID"),
        header(SortKey::Name, "Name"),
        header(SortKey::Email, "Email"),
        header(SortKey::CreatedAt, "Registered"),
    );
    if users.is_empty() {
        out.push_str("(нет пользователей)\n");
    }
    for user in users {
        out.push_str(&format!(
            "{:<8} {:<24} {:<32} {}\n",
            user.id,
            user.name,
            user.email,
            format_registration_date(user.created_at)
        ));
    }
    out
}
