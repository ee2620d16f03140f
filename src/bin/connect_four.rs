use std::error::Error;

use clap::{Parser, ValueEnum};
use connect_four_rl::{
    agent::{Agent, Interactive, RandomAgent},
    algo::tabular::{Policy, QLearner, QLearnerConfig, ValueInit},
    decay::{self, Decay},
    error::AgentError,
    exploration::{EpsilonGreedy, Softmax},
    game::{Game, Tally, Token},
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Opponent {
    /// Uniformly random legal moves
    Random,
    /// A second Q-learner with its own table
    Learner,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Selection {
    /// Epsilon-greedy
    Greedy,
    /// Softmax with epsilon as the temperature
    Softmax,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Init {
    /// Every new estimate starts at 1.0
    Optimistic,
    /// New estimates are drawn from [0, 1)
    Uniform,
}

/// Train a Q-learning agent at Connect Four, then play it
#[derive(Parser, Debug)]
#[command(name = "connect-four", version, about)]
struct Cli {
    /// Number of training games
    #[arg(long, default_value_t = 200_000)]
    games: u32,

    /// Who the learner trains against
    #[arg(long, value_enum, default_value_t = Opponent::Random)]
    opponent: Opponent,

    /// How the learner selects moves
    #[arg(long, value_enum, default_value_t = Selection::Greedy)]
    policy: Selection,

    /// How unseen state-move pairs are initialized
    #[arg(long, value_enum, default_value_t = Init::Optimistic)]
    init: Init,

    /// Exploration rate (or softmax temperature)
    #[arg(long, default_value_t = 0.2)]
    epsilon: f32,

    /// Exponential decay rate of epsilon per game; constant when absent
    #[arg(long)]
    epsilon_decay: Option<f32>,

    /// Learning rate
    #[arg(long, default_value_t = 0.3)]
    alpha: f32,

    /// Discount factor
    #[arg(long, default_value_t = 0.9)]
    gamma: f32,

    /// Seed for a reproducible learner
    #[arg(long)]
    seed: Option<u64>,

    /// After training, play this many games against a random agent instead of a human
    #[arg(long)]
    evaluate: Option<u32>,

    /// Log training progress every this many games
    #[arg(long, default_value_t = 10_000)]
    log_every: u32,
}

impl Cli {
    fn config<D: Decay>(&self, schedule: D) -> QLearnerConfig<D> {
        let policy = match self.policy {
            Selection::Greedy => Policy::EpsilonGreedy(EpsilonGreedy::new(schedule)),
            Selection::Softmax => Policy::Softmax(Softmax::new(schedule)),
        };
        let init = match self.init {
            Init::Optimistic => ValueInit::default(),
            Init::Uniform => ValueInit::uniform(),
        };
        QLearnerConfig {
            policy,
            init,
            alpha: self.alpha,
            gamma: self.gamma,
            shape: Default::default(),
        }
    }

    fn learner<D: Decay>(&self, schedule: D, offset: u64) -> QLearner<D> {
        let config = self.config(schedule);
        match self.seed {
            Some(seed) => QLearner::seeded(config, seed.wrapping_add(offset)),
            None => QLearner::new(config),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.epsilon_decay {
        Some(rate) => {
            let schedule = || decay::Exponential::new(rate, cli.epsilon, 0.0);
            run(&cli, schedule()?, schedule()?)
        }
        None => run(
            &cli,
            decay::Constant::new(cli.epsilon),
            decay::Constant::new(cli.epsilon),
        ),
    }
}

fn run<D>(cli: &Cli, schedule: D, opponent_schedule: D) -> Result<(), Box<dyn Error>>
where
    D: Decay + 'static,
{
    let mut learner = cli.learner(schedule, 0);
    let mut opponent: Box<dyn Agent> = match cli.opponent {
        Opponent::Random => match cli.seed {
            Some(seed) => Box::new(RandomAgent::seeded(seed.wrapping_add(1))),
            None => Box::new(RandomAgent::new()),
        },
        Opponent::Learner => Box::new(cli.learner(opponent_schedule, 1)),
    };

    log::info!("training for {} games against {:?}", cli.games, cli.opponent);
    let mut tally = Tally::new();
    for i in 1..=cli.games {
        let outcome = Game::new(&mut learner, opponent.as_mut()).play()?;
        tally.record(outcome);
        if cli.log_every > 0 && i % cli.log_every == 0 {
            log::info!(
                "game {i}: {tally}, learner win rate {:.3}, {} table entries",
                tally.win_rate(Token::X),
                learner.q_table().len()
            );
            tally.take();
        }
    }

    learner.set_exploring(false);
    match cli.evaluate {
        Some(games) => evaluate(&mut learner, games),
        None => play_human(&mut learner),
    }
}

fn evaluate<D: Decay>(learner: &mut QLearner<D>, games: u32) -> Result<(), Box<dyn Error>> {
    let mut random = RandomAgent::new();
    let mut tally = Tally::new();
    for _ in 0..games {
        tally.record(Game::new(&mut *learner, &mut random).play()?);
    }
    log::info!(
        "evaluation: {tally}, learner win rate {:.3}",
        tally.win_rate(Token::X)
    );
    Ok(())
}

fn play_human<D: Decay>(learner: &mut QLearner<D>) -> Result<(), Box<dyn Error>> {
    let mut human = Interactive::stdio();
    let mut tally = Tally::new();
    loop {
        match Game::new(&mut *learner, &mut human).play() {
            Ok(outcome) => {
                println!("{outcome}");
                tally.record(outcome);
            }
            Err(AgentError::InputClosed) => {
                log::info!("{tally}");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }
}
