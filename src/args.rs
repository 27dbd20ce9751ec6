use clap::{ArgAction, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "minion", version)]
pub struct Args {
    /// Turn debugging information on
    #[arg(short, long, global = true, action(ArgAction::Count))]
    pub verbose: u8,
    /// Less verbose output
    #[arg(short, long, global = true, action(ArgAction::Count))]
    pub quiet: u8,
    /// Base url of the minion web service
    #[arg(
        long,
        global = true,
        env = "MINION_ENDPOINT",
        default_value = "http://127.0.0.1:8383"
    )]
    pub endpoint: String,
    #[arg(long, global = true, env = "MINION_API_USER", default_value = "")]
    pub api_user: String,
    #[arg(
        long,
        global = true,
        env = "MINION_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub api_key: String,
    /// Give up on requests after this many seconds
    #[arg(long, global = true, value_name = "SECONDS")]
    pub timeout: Option<u64>,
    #[command(subcommand)]
    pub subcommand: SubCommand,
}

#[derive(Debug, Subcommand)]
pub enum SubCommand {
    /// Manage sites registered for scanning
    Sites {
        #[command(subcommand)]
        subcommand: Sites,
    },
    /// Look up scan plans
    Plans {
        #[command(subcommand)]
        subcommand: Plans,
    },
    /// Start and inspect scans
    Scans {
        #[command(subcommand)]
        subcommand: Scans,
    },
    /// List the event types sent to scan callback urls
    CallbackEvents,
}

#[derive(Debug, Subcommand)]
pub enum Sites {
    Ls {
        /// Only list sites with this url
        #[arg(long)]
        url: Option<String>,
    },
    Create {
        url: String,
        /// Plans the site may be scanned with
        #[arg(short, long = "plan", value_name = "NAME")]
        plans: Vec<String>,
        #[arg(short, long = "group", value_name = "NAME")]
        groups: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum Plans {
    Get { name: String },
}

#[derive(Debug, Subcommand)]
pub enum Scans {
    Ls {
        #[arg(long)]
        site_id: String,
        #[arg(long = "plan", value_name = "NAME")]
        plan_name: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    Get {
        id: String,
    },
    Create {
        #[arg(long)]
        site_id: String,
        #[arg(long = "plan", value_name = "NAME")]
        plan_name: String,
        /// The service posts scan and session state changes to this url
        #[arg(long)]
        callback_url: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scans_create() {
        let args = Args::parse_from([
            "minion",
            "--endpoint",
            "http://minion.example.com",
            "scans",
            "create",
            "--site-id",
            "s1",
            "--plan",
            "basic",
            "--callback-url",
            "http://localhost:8080/hook",
        ]);
        assert_eq!(args.endpoint, "http://minion.example.com");
        match args.subcommand {
            SubCommand::Scans {
                subcommand:
                    Scans::Create {
                        site_id,
                        plan_name,
                        callback_url,
                    },
            } => {
                assert_eq!(site_id, "s1");
                assert_eq!(plan_name, "basic");
                assert_eq!(callback_url, "http://localhost:8080/hook");
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_parse_sites_create() {
        let args = Args::parse_from([
            "minion",
            "sites",
            "create",
            "http://example.com",
            "-p",
            "basic",
            "--plan",
            "nmap",
            "-g",
            "infra",
        ]);
        match args.subcommand {
            SubCommand::Sites {
                subcommand: Sites::Create { url, plans, groups },
            } => {
                assert_eq!(url, "http://example.com");
                assert_eq!(plans, vec!["basic", "nmap"]);
                assert_eq!(groups, vec!["infra"]);
            }
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_scans_ls_default_limit() {
        let args = Args::parse_from(["minion", "scans", "ls", "--site-id", "s1", "--plan", "basic"]);
        match args.subcommand {
            SubCommand::Scans {
                subcommand: Scans::Ls { limit, .. },
            } => assert_eq!(limit, 10),
            other => panic!("unexpected subcommand: {:?}", other),
        }
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
