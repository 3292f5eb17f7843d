use clap::Parser;
use data_mapper::utils::logger;
use data_mapper::{
    DatabaseProfile, DatabaseRegistry, FieldSet, FieldSpec, Filter, MapperRegistry, Model,
    ProfileSelection, Row,
};

#[derive(Parser)]
#[command(name = "team-demo")]
#[command(about = "Data mapper demo: store and query teams")]
struct Args {
    /// Path to a TOML profiles file (defaults to an in-memory SQLite database)
    #[arg(short, long)]
    profiles: Option<String>,

    /// Profile name to connect with (defaults to the last registered profile)
    #[arg(long)]
    profile: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone)]
struct Team {
    name: String,
    token: Option<String>,
}

impl Model for Team {
    fn model_name() -> &'static str {
        "team"
    }

    fn fields() -> FieldSet {
        FieldSet::new()
            .field("name", FieldSpec::text())
            .field("token", FieldSpec::text().default_value("unset"))
    }

    fn to_row(&self) -> Row {
        let mut row = Row::new().with("name", self.name.clone());
        if let Some(token) = &self.token {
            row.set("token", token.clone());
        }
        row
    }

    fn from_row(row: &Row) -> data_mapper::Result<Self> {
        Ok(Self {
            name: row.text("name").unwrap_or_default().to_string(),
            token: row.text("token").map(|token| token.to_string()),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting team demo");

    // 準備資料庫註冊表:有設定檔就載入,否則用記憶體 SQLite
    let databases = match &args.profiles {
        Some(path) => {
            tracing::info!("📁 Loading database profiles from: {}", path);
            match DatabaseRegistry::with_profiles_file(path) {
                Ok(registry) => registry,
                Err(e) => {
                    eprintln!("❌ Failed to load profiles file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            }
        }
        None => {
            tracing::info!("📁 No profiles file given, using an in-memory SQLite database");
            let mut registry = DatabaseRegistry::new();
            registry.initialize();
            let mut profile = DatabaseProfile::new("in-memory");
            profile.system = Some("sqlite".to_string());
            registry.register_profile(profile)?;
            registry
        }
    };

    let selection = match &args.profile {
        Some(name) => ProfileSelection::Named(name.clone()),
        None => ProfileSelection::LastRegistered,
    };

    // 註冊 Team 的 mapper
    let mut mappers = MapperRegistry::new();
    mappers.initialize();
    mappers.register::<Team>(&databases, selection)?;
    let mapper = mappers.mapper::<Team>()?;

    tracing::info!(
        "✅ Mapper ready for table '{}' on profile '{}'",
        mapper.table(),
        mapper.database().profile().name
    );

    // 存入示範資料;沒有 token 的隊伍會拿到預設值
    let teams = [
        Team {
            name: "Rustaceans".to_string(),
            token: Some("tok-1".to_string()),
        },
        Team {
            name: "Borrow Checkers".to_string(),
            token: Some("tok-2".to_string()),
        },
        Team {
            name: "Lifetimes".to_string(),
            token: None,
        },
    ];
    for team in &teams {
        mapper.save(team).await?;
        tracing::info!("💾 Saved team '{}'", team.name);
    }

    // 查詢全部
    let all = mapper.find(&Filter::new(), None).await?;
    println!("📋 Teams in database:");
    for team in &all {
        println!("  {} (token: {})", team.name, team.token.as_deref().unwrap_or("-"));
    }

    // 條件查詢:預設 token 的隊伍
    let filter = Filter::new().equals("token", "unset");
    let unset = mapper.find(&filter, None).await?;
    println!("🔍 Teams with the default token: {}", unset.len());

    // 刪除並回報筆數
    let deleted = mapper.delete(&Filter::new().equals("name", "Lifetimes")).await?;
    println!("🔄 Deleted {} team(s)", deleted);

    let remaining = mapper.find(&Filter::new(), None).await?;
    println!("✅ {} team(s) remaining", remaining.len());

    Ok(())
}
