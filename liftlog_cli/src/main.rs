use clap::{Parser, Subcommand};
use liftlog_core::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "liftlog")]
#[command(about = "Workout tracker command line client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override backend server URL
    #[arg(long, global = true)]
    server: Option<String>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in and store the session
    Login {
        username: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Clear the stored session
    Logout,

    /// Show who is currently logged in
    Whoami,

    /// List your workouts
    List,

    /// Show one workout
    Show { id: String },

    /// Create a workout
    Add {
        /// Workout name
        #[arg(long)]
        name: String,

        /// Exercise as NAME:SETS:REPS:WEIGHT (repeatable)
        #[arg(long = "exercise", value_name = "NAME:SETS:REPS:WEIGHT")]
        exercises: Vec<String>,
    },

    /// Update a workout; given exercises replace the stored list
    Edit {
        id: String,

        /// New workout name
        #[arg(long)]
        name: Option<String>,

        /// Replacement exercise as NAME:SETS:REPS:WEIGHT (repeatable)
        #[arg(long = "exercise", value_name = "NAME:SETS:REPS:WEIGHT")]
        exercises: Vec<String>,
    },

    /// Delete a workout
    Remove {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    liftlog_core::logging::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.data.data_dir.clone());
    let base_url = cli
        .server
        .clone()
        .unwrap_or_else(|| config.server.base_url.clone());

    let store = SessionStore::new(&data_dir);
    let mut session = Session::restore(store.clone());
    let client = ApiClient::builder()
        .base_url(base_url)
        .timeout_secs(config.server.timeout_secs)
        .store(store)
        .build()?;
    let unit = config.units.weight;

    let result = match cli.command {
        Commands::Register { username, password } => {
            cmd_register(&client, &mut session, &username, password).await
        }
        Commands::Login { username, password } => {
            cmd_login(&client, &mut session, &username, password).await
        }
        Commands::Logout => cmd_logout(&mut session),
        Commands::Whoami => cmd_whoami(&session),
        Commands::List => cmd_list(&client, &session, unit).await,
        Commands::Show { id } => cmd_show(&client, &session, &id, unit).await,
        Commands::Add { name, exercises } => {
            cmd_add(&client, &session, &name, &exercises).await
        }
        Commands::Edit {
            id,
            name,
            exercises,
        } => cmd_edit(&client, &session, &id, name, &exercises).await,
        Commands::Remove { id, yes } => cmd_remove(&client, &session, &id, yes).await,
    };

    // Forced-logout convention: a rejected token invalidates the session
    if let Err(ref e) = result {
        if e.is_auth_failure() && session.is_logged_in() {
            session.logout()?;
            eprintln!("Session cleared. Log in again with `liftlog login <username>`.");
        }
    }

    result
}

async fn cmd_register(
    client: &ApiClient,
    session: &mut Session,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let credentials = match password {
        Some(password) => validate::register_credentials(username, &password, &password)?,
        None => {
            let password = prompt("Password: ")?;
            let confirm = prompt("Confirm password: ")?;
            validate::register_credentials(username, &password, &confirm)?
        }
    };

    let response = users::register(client, &credentials).await?;
    println!("{}", response.message);

    // Some backends hand out a token on registration; otherwise log in
    let (token, user) = match response.token {
        Some(token) => (token, response.user),
        None => {
            let login = users::login(client, &credentials).await?;
            let token = login
                .token
                .ok_or_else(|| Error::Session("login response did not include a token".into()))?;
            (token, login.user)
        }
    };

    session.login(&token, user)?;
    println!("✓ Logged in as {}", credentials.username);
    Ok(())
}

async fn cmd_login(
    client: &ApiClient,
    session: &mut Session,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt("Password: ")?,
    };
    let credentials = validate::login_credentials(username, &password)?;

    let response = users::login(client, &credentials).await?;
    let token = response
        .token
        .ok_or_else(|| Error::Session("login response did not include a token".into()))?;
    session.login(&token, response.user)?;

    println!("✓ Logged in as {}", credentials.username);
    Ok(())
}

fn cmd_logout(session: &mut Session) -> Result<()> {
    session.logout()?;
    println!("✓ Logged out");
    Ok(())
}

fn cmd_whoami(session: &Session) -> Result<()> {
    match session.user() {
        Some(user) => println!("Logged in as {} (id {})", user.username, user.id),
        None => println!("Not logged in"),
    }
    Ok(())
}

async fn cmd_list(client: &ApiClient, session: &Session, unit: WeightUnit) -> Result<()> {
    let username = require_login(session)?;
    let workouts = workouts::get_user_workouts(client, username).await?;

    if workouts.is_empty() {
        println!("No workouts yet. Add some and start tracking 💪");
        return Ok(());
    }

    println!("Workouts for {}:", username);
    println!();
    for workout in &workouts {
        display_workout(workout, unit);
        println!();
    }
    Ok(())
}

async fn cmd_show(client: &ApiClient, session: &Session, id: &str, unit: WeightUnit) -> Result<()> {
    require_login(session)?;
    let workout = workouts::get_workout(client, id).await?;
    display_workout(&workout, unit);
    Ok(())
}

async fn cmd_add(
    client: &ApiClient,
    session: &Session,
    name: &str,
    exercise_specs: &[String],
) -> Result<()> {
    require_login(session)?;

    let exercises = exercise_specs
        .iter()
        .map(|spec| parse_exercise(spec))
        .collect::<Result<Vec<_>>>()?;
    let draft = WorkoutDraft {
        name: name.to_string(),
        exercises,
    };
    validate::workout_draft(&draft)?;

    let created = workouts::create_workout(client, &draft).await?;
    println!("✓ Workout created: {} [{}]", created.name, created.id);
    Ok(())
}

async fn cmd_edit(
    client: &ApiClient,
    session: &Session,
    id: &str,
    name: Option<String>,
    exercise_specs: &[String],
) -> Result<()> {
    require_login(session)?;

    if name.is_none() && exercise_specs.is_empty() {
        return Err(Error::Validation(
            "Nothing to update: pass --name and/or --exercise".into(),
        ));
    }
    if let Some(ref new_name) = name {
        if new_name.trim().is_empty() {
            return Err(Error::Validation("Workout name is required".into()));
        }
    }

    let exercises = if exercise_specs.is_empty() {
        None
    } else {
        let parsed = exercise_specs
            .iter()
            .map(|spec| parse_exercise(spec))
            .collect::<Result<Vec<_>>>()?;
        validate::exercises(&parsed)?;
        Some(parsed)
    };

    let patch = WorkoutPatch { name, exercises };
    let updated = workouts::update_workout(client, id, &patch).await?;
    println!("✓ Workout updated: {} [{}]", updated.name, updated.id);
    Ok(())
}

async fn cmd_remove(client: &ApiClient, session: &Session, id: &str, yes: bool) -> Result<()> {
    require_login(session)?;

    if !yes {
        let workout = workouts::get_workout(client, id).await?;
        let answer = prompt(&format!(
            "Delete \"{}\"? This action cannot be undone. [y/N] ",
            workout.name
        ))?;
        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted");
            return Ok(());
        }
    }

    let confirmation = workouts::delete_workout(client, id).await?;
    println!("✓ {}", confirmation.message);
    Ok(())
}

fn require_login(session: &Session) -> Result<&str> {
    session
        .user()
        .map(|user| user.username.as_str())
        .ok_or_else(|| Error::Session("not logged in. Run `liftlog login <username>` first".into()))
}

/// Parse NAME:SETS:REPS:WEIGHT, splitting from the right so the name may
/// contain colons.
fn parse_exercise(spec: &str) -> Result<Exercise> {
    let parts: Vec<&str> = spec.rsplitn(4, ':').collect();
    if parts.len() != 4 {
        return Err(Error::Validation(format!(
            "Invalid exercise '{}': expected NAME:SETS:REPS:WEIGHT",
            spec
        )));
    }

    // rsplitn yields fields right to left
    let (weight, reps, sets, name) = (parts[0], parts[1], parts[2], parts[3]);
    let sets: u32 = sets
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("Invalid sets in '{}'", spec)))?;
    let reps: u32 = reps
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("Invalid reps in '{}'", spec)))?;
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("Invalid weight in '{}'", spec)))?;

    Ok(Exercise::new(name.trim(), sets, reps, weight))
}

fn display_workout(workout: &Workout, unit: WeightUnit) {
    let count = workout.exercises.len();
    println!(
        "  {} [{}] ({} {})",
        workout.name,
        workout.id,
        count,
        if count == 1 { "exercise" } else { "exercises" }
    );

    if workout.exercises.is_empty() {
        println!("    (no exercises in this workout)");
        return;
    }
    for exercise in &workout.exercises {
        println!(
            "    → {}: {} x {} @ {} {}",
            exercise.name, exercise.sets, exercise.reps, exercise.weight, unit
        );
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
