use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use employee_records::client::form::format_salary;
use employee_records::client::{EmployeeApi, EmployeeForm, table};
use employee_records::model::employee::{Gender, ProfileColor, Salutation};

/// Command-line client for the employee records API.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the API, including its prefix.
    #[arg(long, env = "EMPLOYEE_API_URL", default_value = "http://localhost:3001/api")]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every employee as a table.
    List,
    /// Show one employee.
    Show { id: u64 },
    /// Add a new employee.
    Add(FormArgs),
    /// Edit an existing employee; omitted fields keep their value.
    Edit {
        id: u64,
        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(Args)]
struct FormArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    /// DR, MR, MS, MRS or MX (case-insensitive). Also sets the gender.
    #[arg(long, value_parser = parse_upper::<Salutation>)]
    salutation: Option<Salutation>,
    /// MALE, FEMALE or UNSPECIFIED. Ignored when --salutation is given.
    #[arg(long, value_parser = parse_upper::<Gender>)]
    gender: Option<Gender>,
    #[arg(long)]
    employee_number: Option<String>,
    /// Yearly gross salary; spaces are allowed ("50 000").
    #[arg(long)]
    salary: Option<String>,
    /// GREEN, BLUE, RED or DEFAULT (case-insensitive).
    #[arg(long, value_parser = parse_upper::<ProfileColor>)]
    color: Option<ProfileColor>,
}

fn parse_upper<T: std::str::FromStr>(raw: &str) -> Result<T, String> {
    raw.trim()
        .to_uppercase()
        .parse()
        .map_err(|_| format!("unknown value {:?}", raw))
}

impl FormArgs {
    fn apply(self, form: &mut EmployeeForm) {
        if let Some(v) = self.first_name {
            form.set_first_name(&v);
        }
        if let Some(v) = self.last_name {
            form.set_last_name(&v);
        }
        // gender first, so a salutation change wins as it does in the form
        if let Some(v) = self.gender {
            form.set_gender(v);
        }
        if let Some(v) = self.salutation {
            form.set_salutation(v);
        }
        if let Some(v) = self.employee_number {
            form.set_employee_number(&v);
        }
        if let Some(v) = self.salary {
            form.set_gross_salary(&v);
        }
        if let Some(v) = self.color {
            form.set_profile_color(v);
        }
    }
}

async fn submit(api: &EmployeeApi, form: EmployeeForm) -> Result<()> {
    let verb = if form.employee_id().is_some() { "updated" } else { "added" };
    let saved = form.submit(api).await?;

    println!("{} successfully {} (id {}).", saved.full_name, verb, saved.id);
    println!("{}", table::render(std::slice::from_ref(&saved)));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let api = EmployeeApi::new(&cli.base_url).context("Failed to build HTTP client")?;

    match cli.command {
        Commands::List => {
            println!("{}", table::load(&api).await);
        }
        Commands::Show { id } => {
            let employee = api
                .get_employee(id)
                .await
                .ok_or_else(|| anyhow!("Employee {} not found", id))?;
            println!("{}", table::render(std::slice::from_ref(&employee)));
            println!("Full name:    {}", employee.full_name);
            println!("Gender:       {}", table::display_case(employee.gender.as_ref()));
            println!("Gross salary: {}", format_salary(employee.gross_salary_py));
        }
        Commands::Add(args) => {
            let mut form = EmployeeForm::new();
            args.apply(&mut form);
            submit(&api, form).await?;
        }
        Commands::Edit { id, form: args } => {
            let Some(existing) = api.get_employee(id).await else {
                bail!("Employee {} not found", id);
            };
            let mut form = EmployeeForm::edit(&existing);
            args.apply(&mut form);
            submit(&api, form).await?;
        }
    }

    Ok(())
}
