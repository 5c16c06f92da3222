//! Basic example of the wirebox container.

use std::cell::RefCell;
use std::rc::Rc;

use wirebox::prelude::*;

// === Define your types ===

struct Config {
    database_url: String,
    debug: bool,
}

struct Logger {
    lines: RefCell<Vec<String>>,
}

impl Logger {
    fn log(&self, msg: &str) {
        println!("[LOG] {msg}");
        self.lines.borrow_mut().push(msg.to_string());
    }
}

struct Database {
    url: String,
    logger: Rc<Logger>,
}

impl Database {
    fn query(&self, sql: &str) -> String {
        self.logger.log(&format!("Executing: {sql}"));
        format!("Results from {}", self.url)
    }
}

struct UserService {
    db: Rc<Database>,
}

impl UserService {
    fn get_user(&self, id: u64) -> String {
        self.db.query(&format!("SELECT * FROM users WHERE id = {id}"))
    }
}

wirebox::accessors! {
    trait AppDeps {
        config: Config,
        logger: Logger,
        database: Database,
        user_service: UserService = "userService",
    }
}

// === Registration split across modules ===

fn add_infrastructure(container: &mut Container) -> Result<&mut Container> {
    container
        .add("logger", |_| Ok(Logger { lines: RefCell::new(Vec::new()) }))?
        .add("database", |ctx| {
            let config = ctx.config()?;
            Ok(Database {
                url: config.database_url.clone(),
                logger: ctx.logger()?,
            })
        })
}

struct ServicesProvider;

impl Provider for ServicesProvider {
    fn register(&self, container: &mut Container) -> Result<()> {
        container.add("userService", |ctx| Ok(UserService { db: ctx.database()? }))?;
        Ok(())
    }
}

fn main() -> Result<()> {
    // Initialize tracing (logging)
    tracing_subscriber::fmt()
        .with_env_filter("wirebox=debug,wirebox_container=debug")
        .init();

    let mut base = Container::new();
    base.add_value(
        "config",
        Config {
            database_url: "postgres://localhost/myapp".to_string(),
            debug: true,
        },
    )?
    .extend(add_infrastructure)?
    .provide(&ServicesProvider)?;

    println!("✅ Container ready: {base:?}");

    let config = base.config()?;
    println!("📋 Config: database_url={}, debug={}", config.database_url, config.debug);

    println!("👤 {}", base.user_service()?.get_user(42));
    print!("{}", base.snapshot());

    // === Bounded contexts: clones with their own overrides ===
    let mut reporting = base.clone();
    reporting.update("database", |ctx| {
        Ok(Database {
            url: "postgres://replica/myapp".to_string(),
            logger: ctx.logger()?,
        })
    })?;
    reporting.update("userService", |ctx| Ok(UserService { db: ctx.database()? }))?;

    println!("📊 {}", reporting.user_service()?.get_user(7));
    println!("👤 {}", base.user_service()?.get_user(7));

    // Both contexts share the logger resolved before cloning.
    println!("📝 {} lines logged", base.logger()?.lines.borrow().len());

    tracing::info!("done");
    Ok(())
}
