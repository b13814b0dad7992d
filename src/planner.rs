use anyhow::{anyhow, bail, Context, Result};
use std::io::Read;
use tracing::{info, warn};

use fx_trade_planner::config::Config;
use fx_trade_planner::core::sessions::SessionClock;
use fx_trade_planner::core::{
    filter_currencies, resolve_pairs, BiasFilter, BudgetCalculator, PairFilter, StrengthClassifier,
    TradePlan,
};
use fx_trade_planner::insights::{
    build_request, fetch_recommendations, Completion, HttpInsightClient, InsightService,
    InsightTracker,
};
use fx_trade_planner::models::{Action, BudgetEdit, Currency, Timeframe, PAIR_GROUPS};
use fx_trade_planner::report::{self, BudgetReport};
use fx_trade_planner::state::{
    export_portable, import_paste, parse_portable, SessionState, SessionStore,
};

pub const USAGE: &str = "\
usage: fx-planner <command> [args]

  show [--bias all|actionable|neutral] [--filter TEXT] [--currency TEXT]
  set <CURRENCY> <d1|4h|1h> <VALUE>
  reset [CURRENCY]
  import [FILE]                 tab-separated rows, stdin when FILE is omitted
  export
  load [FILE]                   portable JSON, stdin when FILE is omitted
  insights
  budget show
  budget add <PAIR>             toggle a BUY/SELL pair from the plan
  budget adopt <PAIR>           budget a recommended pair
  budget remove <PAIR>
  budget set <PAIR> <lot|sl|tp|news|action> <VALUE>
  capital [AMOUNT]
  sessions";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show {
        filter: PairFilter,
        currency: Option<String>,
    },
    Set {
        currency: Currency,
        timeframe: Timeframe,
        value: f64,
    },
    Reset(Option<Currency>),
    Import(Option<String>),
    Export,
    Load(Option<String>),
    Insights,
    Budget(BudgetCommand),
    Capital(Option<f64>),
    Sessions,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BudgetCommand {
    Show,
    Add(String),
    Adopt(String),
    Remove(String),
    Set(String, BudgetEdit),
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Command> {
        let (head, rest) = match args.split_first() {
            Some((head, rest)) => (head.as_str(), rest),
            None => return Ok(Command::Show {
                filter: PairFilter::default(),
                currency: None,
            }),
        };

        let cmd = match head {
            "show" => parse_show(rest)?,
            "set" => {
                let [currency, tf, value] = rest else {
                    bail!("set takes <CURRENCY> <d1|4h|1h> <VALUE>");
                };
                Command::Set {
                    currency: parse_currency(currency)?,
                    timeframe: Timeframe::from_str_loose(tf)
                        .ok_or_else(|| anyhow!("unknown timeframe '{}'", tf))?,
                    value: parse_number(value)?,
                }
            }
            "reset" => Command::Reset(rest.first().map(|c| parse_currency(c)).transpose()?),
            "import" => Command::Import(rest.first().cloned()),
            "export" => Command::Export,
            "load" => Command::Load(rest.first().cloned()),
            "insights" => Command::Insights,
            "budget" => Command::Budget(parse_budget(rest)?),
            "capital" => Command::Capital(rest.first().map(|v| parse_number(v)).transpose()?),
            "sessions" => Command::Sessions,
            other => bail!("unknown command '{}'\n\n{}", other, USAGE),
        };
        Ok(cmd)
    }
}

fn parse_show(args: &[String]) -> Result<Command> {
    let mut filter = PairFilter::default();
    let mut currency = None;
    let mut it = args.iter();
    while let Some(flag) = it.next() {
        let value = it
            .next()
            .ok_or_else(|| anyhow!("{} needs a value", flag))?;
        match flag.as_str() {
            "--bias" => {
                filter.bias = BiasFilter::from_str_loose(value)
                    .ok_or_else(|| anyhow!("unknown bias filter '{}'", value))?
            }
            "--filter" => filter.text = value.clone(),
            "--currency" => currency = Some(value.clone()),
            other => bail!("unknown option '{}'", other),
        }
    }
    Ok(Command::Show { filter, currency })
}

fn parse_budget(args: &[String]) -> Result<BudgetCommand> {
    let sub = args.first().map(String::as_str).unwrap_or("show");
    let pair = || {
        args.get(1)
            .cloned()
            .ok_or_else(|| anyhow!("budget {} needs a pair", sub))
    };
    let cmd = match sub {
        "show" => BudgetCommand::Show,
        "add" => BudgetCommand::Add(pair()?),
        "adopt" => BudgetCommand::Adopt(pair()?),
        "remove" => BudgetCommand::Remove(pair()?),
        "set" => {
            let (Some(field), Some(value)) = (args.get(2), args.get(3)) else {
                bail!("budget set takes <PAIR> <lot|sl|tp|news|action> <VALUE>");
            };
            BudgetCommand::Set(pair()?, parse_edit(field, value)?)
        }
        other => bail!("unknown budget command '{}'", other),
    };
    Ok(cmd)
}

fn parse_edit(field: &str, value: &str) -> Result<BudgetEdit> {
    let edit = match field.to_ascii_lowercase().as_str() {
        "lot" => BudgetEdit::LotSize(parse_number(value)?),
        "sl" => BudgetEdit::StopLoss(parse_number(value)?),
        "tp" => BudgetEdit::TakeProfit(parse_number(value)?),
        "news" => BudgetEdit::NewsRisk(match value.to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" => true,
            "off" | "false" | "no" => false,
            _ => bail!("news takes on|off"),
        }),
        "action" => BudgetEdit::Action(
            Action::from_wire(&value.to_ascii_uppercase())
                .ok_or_else(|| anyhow!("action must be BUY, SELL or HOLD"))?,
        ),
        other => bail!("unknown budget field '{}'", other),
    };
    Ok(edit)
}

fn parse_currency(s: &str) -> Result<Currency> {
    Currency::from_str_loose(s).ok_or_else(|| anyhow!("unknown currency '{}'", s))
}

fn parse_number(s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("'{}' is not a number", s))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("Failed to read {}", p)),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// One planning session: load state, apply a command, save state.
pub struct Planner {
    cfg: Config,
    store: SessionStore,
    state: SessionState,
    classifier: StrengthClassifier,
    calculator: BudgetCalculator,
    tracker: InsightTracker,
}

impl Planner {
    pub fn open(cfg: Config) -> Result<Self> {
        let store = SessionStore::new(&cfg.state_file);
        let state = store
            .load(cfg.default_capital)
            .with_context(|| format!("Failed to load session from {}", store.path().display()))?;

        info!(
            "Profiles: strength={} pip={}",
            cfg.strength_profile,
            cfg.pip_profile.name()
        );

        Ok(Self {
            classifier: StrengthClassifier::new(cfg.strength_profile),
            calculator: BudgetCalculator::new(cfg.pip_profile),
            tracker: InsightTracker::new(),
            store,
            state,
            cfg,
        })
    }

    fn plan(&self) -> Result<TradePlan> {
        Ok(resolve_pairs(
            self.state.correlations.as_slice(),
            PAIR_GROUPS,
            &self.classifier,
        )?)
    }

    fn save(&self) -> Result<()> {
        self.store
            .save(&self.state)
            .with_context(|| format!("Failed to save session to {}", self.store.path().display()))
    }

    pub async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Show { filter, currency } => self.show(&filter, currency.as_deref())?,
            Command::Set {
                currency,
                timeframe,
                value,
            } => {
                self.state.correlations.set(currency, timeframe, value)?;
                info!("{} {} = {}", currency, timeframe.label(), value);
                self.save()?;
            }
            Command::Reset(Some(currency)) => {
                self.state.correlations.reset(currency);
                info!("Reset {}", currency);
                self.save()?;
            }
            Command::Reset(None) => {
                self.state.correlations.reset_all();
                info!("Reset all correlation values");
                self.save()?;
            }
            Command::Import(path) => {
                let text = read_input(path.as_deref())?;
                let result = import_paste(&mut self.state.correlations, &text);
                println!(
                    "Imported {} currencies ({} rows skipped)",
                    result.updated, result.skipped
                );
                self.save()?;
            }
            Command::Export => println!("{}", export_portable(&self.state.correlations)?),
            Command::Load(path) => {
                let text = read_input(path.as_deref())?;
                self.state.correlations = parse_portable(&text)?;
                println!("Loaded correlation values");
                self.save()?;
            }
            Command::Insights => self.insights().await?,
            Command::Budget(cmd) => self.budget(cmd)?,
            Command::Capital(Some(amount)) => {
                if !amount.is_finite() || amount < 0.0 {
                    bail!("capital must be a non-negative number");
                }
                self.state.capital = amount;
                println!("Capital set to ${:.2}", amount);
                self.save()?;
            }
            Command::Capital(None) => println!("Capital: ${:.2}", self.state.capital),
            Command::Sessions => {
                let clock = SessionClock::new(&self.cfg);
                let snap = clock.snapshot(None, &self.state.budget);
                print!("{}", report::render_sessions(&snap));
            }
        }
        Ok(())
    }

    fn show(&self, filter: &PairFilter, currency: Option<&str>) -> Result<()> {
        let plan = self.plan()?;
        let rows = filter_currencies(&plan.currencies, currency.unwrap_or(""));
        print!("{}", report::render_correlations(&rows));

        if !plan.has_correlation_values() {
            println!("\n  Enter correlation values to derive trade biases.");
            return Ok(());
        }
        print!(
            "{}",
            report::render_trade_plan(&plan.filter(filter), &self.state.budget)
        );
        print!(
            "{}",
            report::render_recommendations(self.state.recommendations.as_deref())
        );
        Ok(())
    }

    async fn insights(&mut self) -> Result<()> {
        let plan = self.plan()?;
        if !plan.has_correlation_values() {
            bail!("enter correlation values before requesting insights");
        }

        let request = build_request(plan.pairs(), self.cfg.insight.top_n);
        if request.is_empty() {
            bail!("nothing to ask for: top_n is zero");
        }

        let service: Box<dyn InsightService> = Box::new(HttpInsightClient::new(&self.cfg.insight)?);
        let ticket = self.tracker.begin();
        let outcome = fetch_recommendations(service.as_ref(), &request).await;

        match self
            .tracker
            .complete(ticket, outcome, &mut self.state.recommendations)
        {
            Completion::Applied(_) => {
                self.save()?;
                print!(
                    "{}",
                    report::render_recommendations(self.state.recommendations.as_deref())
                );
            }
            Completion::Failed(e) => {
                return Err(anyhow::Error::new(e).context("Insight request failed"));
            }
            Completion::Stale => warn!("Insight result arrived after a newer request"),
        }
        Ok(())
    }

    fn budget(&mut self, cmd: BudgetCommand) -> Result<()> {
        match cmd {
            BudgetCommand::Show => {}
            BudgetCommand::Add(pair) => {
                let plan = self.plan()?;
                let resolved = plan
                    .find(&pair)
                    .ok_or_else(|| anyhow!("unknown pair '{}'", pair))?;
                let added = self.state.budget.toggle_bias(resolved.symbol, resolved.bias)?;
                println!(
                    "{} {}",
                    resolved.symbol,
                    if added { "added" } else { "removed" }
                );
                self.save()?;
            }
            BudgetCommand::Adopt(pair) => {
                let rec = self
                    .state
                    .recommendations
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .find(|r| r.pair.eq_ignore_ascii_case(pair.trim()))
                    .cloned()
                    .ok_or_else(|| anyhow!("no recommendation for '{}'", pair))?;
                let item = self.state.budget.adopt(&rec)?;
                println!("{} budgeted as {}", item.pair, item.action);
                self.save()?;
            }
            BudgetCommand::Remove(pair) => {
                match self.state.budget.remove(&pair) {
                    Some(item) => println!("{} removed", item.pair),
                    None => println!("{} is not budgeted", pair),
                }
                self.save()?;
            }
            BudgetCommand::Set(pair, edit) => {
                self.state.budget.update(&pair, edit)?;
                self.save()?;
            }
        }

        let summary = BudgetReport::build(&self.calculator, &self.state.budget, self.state.capital);
        print!("{}", summary.render(&self.state.budget));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn no_args_shows_everything() {
        assert_eq!(
            Command::parse(&[]).unwrap(),
            Command::Show {
                filter: PairFilter::default(),
                currency: None
            }
        );
    }

    #[test]
    fn parses_set() {
        assert_eq!(
            Command::parse(&args("set gbp 4h -1.5")).unwrap(),
            Command::Set {
                currency: Currency::Gbp,
                timeframe: Timeframe::H4,
                value: -1.5
            }
        );
        assert!(Command::parse(&args("set gbp 4h")).is_err());
        assert!(Command::parse(&args("set chf d1 1")).is_err());
    }

    #[test]
    fn parses_show_flags() {
        let cmd = Command::parse(&args("show --bias actionable --filter jpy")).unwrap();
        let Command::Show { filter, currency } = cmd else {
            panic!("expected show");
        };
        assert_eq!(filter.bias, BiasFilter::Actionable);
        assert_eq!(filter.text, "jpy");
        assert!(currency.is_none());
        assert!(Command::parse(&args("show --bias")).is_err());
    }

    #[test]
    fn parses_budget_edits() {
        assert_eq!(
            Command::parse(&args("budget set eurusd sl 20")).unwrap(),
            Command::Budget(BudgetCommand::Set(
                "eurusd".into(),
                BudgetEdit::StopLoss(20.0)
            ))
        );
        assert_eq!(
            Command::parse(&args("budget set eurusd news on")).unwrap(),
            Command::Budget(BudgetCommand::Set("eurusd".into(), BudgetEdit::NewsRisk(true)))
        );
        assert_eq!(
            Command::parse(&args("budget")).unwrap(),
            Command::Budget(BudgetCommand::Show)
        );
        assert!(Command::parse(&args("budget set eurusd lot")).is_err());
        assert!(Command::parse(&args("budget set eurusd action maybe")).is_err());
    }

    #[test]
    fn unknown_command_fails() {
        assert!(Command::parse(&args("trade EURUSD")).is_err());
    }
}
