//! Everything around the player: roster, mail, chat, families and market.
use crate::chat::ChatLog;
use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::family::{Family, FamilyRegistry};
use crate::hilo::{
    Guess, GuessOutcome, HigherLowerRound, RoundStatus, cash_out_round, start_round,
};
use crate::mail::{MailDraft, MailRules, Mailbox};
use crate::player::{MockUser, Player};
use crate::stocks::Market;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub roster: Vec<MockUser>,
    pub mailbox: Mailbox,
    pub chat: ChatLog,
    pub families: FamilyRegistry,
    pub market: Market,
}

impl World {
    /// Populate the world from config. Families named by roster members are
    /// registered with the first listed member as boss.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> Self {
        let mut families = FamilyRegistry::new();
        for user in &config.roster {
            let Some(name) = user.family.as_deref() else {
                continue;
            };
            let existing = families.get(name).cloned();
            match existing {
                Some(mut family) => {
                    family.members.push(user.name.clone());
                    families.insert(family);
                }
                None => families.insert(Family {
                    name: name.to_string(),
                    boss: user.name.clone(),
                    members: vec![user.name.clone()],
                    bank: 0,
                    founded_at: 0,
                }),
            }
        }
        Self {
            roster: config.roster.clone(),
            mailbox: Mailbox::new(),
            chat: ChatLog::new(config.chat.clone()),
            families,
            market: Market::new(&config.stocks),
        }
    }

    /// Names that can receive mail, the player's own included.
    #[must_use]
    pub fn directory<'a>(&'a self, player: &'a Player) -> Vec<&'a str> {
        directory_of(player, &self.roster)
    }

    /// Send mail from the player to anyone in the directory. Returns the new message id.
    ///
    /// # Errors
    ///
    /// Same as [`Mailbox::send`].
    pub fn send_mail(
        &mut self,
        from: &Player,
        draft: MailDraft,
        now_ms: u64,
        rules: &MailRules,
    ) -> GameResult<u64> {
        let directory = directory_of(from, &self.roster);
        self.mailbox
            .send(&from.name, draft, now_ms, rules, &directory)
            .map(|message| message.id)
    }

    /// Roster members currently in `city`.
    pub fn users_in<'a>(&'a self, city: &'a str) -> impl Iterator<Item = &'a MockUser> {
        self.roster.iter().filter(move |u| u.city == city)
    }

    /// # Errors
    ///
    /// Returns [`GameError::UnknownUser`] when no roster entry has that id.
    pub fn user_mut(&mut self, id: &str) -> GameResult<&mut MockUser> {
        self.roster
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| GameError::UnknownUser(id.to_string()))
    }
}

/// Saved game: the player, the world around them and any Higher-or-Lower
/// round still on the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player: Player,
    pub world: World,
    /// Last Higher-or-Lower round. The stake is already debited while it is
    /// active, so it lives here rather than in any view.
    #[serde(default)]
    pub hilo: Option<HigherLowerRound>,
}

impl GameSnapshot {
    #[must_use]
    pub const fn new(player: Player, world: World) -> Self {
        Self {
            player,
            world,
            hilo: None,
        }
    }

    /// The Higher-or-Lower round, if one is still being played.
    #[must_use]
    pub fn active_hilo(&self) -> Option<&HigherLowerRound> {
        self.hilo
            .as_ref()
            .filter(|round| round.status() == RoundStatus::Active)
    }

    /// Stake `bet` and deal a new round onto the table.
    ///
    /// # Errors
    ///
    /// [`GameError::RoundInProgress`] while a round is active, otherwise the
    /// errors of [`start_round`].
    pub fn deal_hilo<R: Rng + ?Sized>(
        &mut self,
        bet: u64,
        rng: &mut R,
    ) -> GameResult<&HigherLowerRound> {
        if self.active_hilo().is_some() {
            return Err(GameError::RoundInProgress);
        }
        let round = start_round(&mut self.player, bet, rng)?;
        Ok(self.hilo.insert(round))
    }

    /// # Errors
    ///
    /// [`GameError::NoRound`] when nothing was dealt, otherwise the errors of
    /// [`HigherLowerRound::guess`].
    pub fn guess_hilo(&mut self, guess: Guess) -> GameResult<GuessOutcome> {
        self.hilo.as_mut().ok_or(GameError::NoRound)?.guess(guess)
    }

    /// # Errors
    ///
    /// [`GameError::NoRound`] when nothing was dealt, otherwise the errors of
    /// [`HigherLowerRound::cash_out`].
    pub fn cash_out_hilo(&mut self) -> GameResult<u64> {
        let round = self.hilo.as_mut().ok_or(GameError::NoRound)?;
        cash_out_round(&mut self.player, round)
    }
}

fn directory_of<'a>(player: &'a Player, roster: &'a [MockUser]) -> Vec<&'a str> {
    std::iter::once(player.name.as_str())
        .chain(roster.iter().map(|u| u.name.as_str()))
        .collect()
}
