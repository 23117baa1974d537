use super::player::Player;
use super::translation::translate;
use crate::Chips;
use crate::gameplay::Action;
use crate::gameplay::State;
use colored::Colorize;
use dialoguer::Input;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Plays from the terminal.
///
/// Accepts `fold`, `check`, `call`, `shove`, or a number of chips to add.
/// Bet sizes the abstraction does not know are translated onto the
/// neighbouring abstracted sizes.
pub struct HumanPlayer {
    rng: SmallRng,
}

impl HumanPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// parse one line of input into a legal action
    pub fn interpret(&mut self, input: &str, state: &State) -> anyhow::Result<Action> {
        let legal = state.legal();
        let call = state.to_call();
        let stack = state.actor().stack();
        let action = match input.trim().to_lowercase().as_str() {
            "f" | "fold" => Action::Fold,
            "k" | "check" => Action::Call(0),
            "c" | "call" => Action::Call(call.min(stack)),
            "a" | "allin" | "shove" => Action::AllIn(stack),
            number => {
                let amount = number
                    .parse::<Chips>()
                    .map_err(|_| anyhow::anyhow!("not an action or a number: {}", number))?;
                anyhow::ensure!(amount >= call, "must add at least {} to call", call);
                match amount {
                    x if x >= stack => Action::AllIn(stack),
                    x if x == call => Action::Call(call),
                    x => translate(x, state.pot(), &legal, &mut self.rng)?,
                }
            }
        };
        let action = match action {
            Action::Call(x) if x >= stack => Action::AllIn(stack),
            action => action,
        };
        anyhow::ensure!(legal.contains(&action), "{} is not legal here", action);
        Ok(action)
    }

    /// check when free, otherwise fold
    fn fallback(state: &State) -> Action {
        match state.to_call() {
            0 => Action::Call(0),
            _ => Action::Fold,
        }
    }

    fn prompt(state: &State) -> String {
        let seat = state.actor();
        let options = state
            .legal()
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(" | ");
        format!(
            "\n{} {}  board {}  pot {}  stack {}\n{}\n",
            "YOU HOLD".bold(),
            seat.hole().to_string().green(),
            state.community().cards(),
            state.pot(),
            seat.stack(),
            options.dimmed(),
        )
    }
}

impl Player for HumanPlayer {
    fn next_action(&mut self, state: &State) -> Action {
        println!("{}", Self::prompt(state));
        loop {
            let input = Input::<String>::new()
                .with_prompt("action")
                .report(false)
                .interact_text();
            let input = match input {
                Ok(input) => input,
                Err(e) => {
                    log::warn!("{:<32}{:<32}", "terminal unavailable, folding", e);
                    return Self::fallback(state);
                }
            };
            match self.interpret(&input, state) {
                Ok(action) => return action,
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
    }
}
