use omerta_game::countdown::CountdownKind;
use omerta_game::{
    CrimeOutcome, GameConfig, GameSnapshot, MailDraft, Player, World, bank, commit_crime_by_id,
    depart, seeded,
};

fn new_game() -> (GameConfig, GameSnapshot) {
    let config = GameConfig::default_config();
    let snapshot = GameSnapshot::new(
        Player::new("Vito", &config.player),
        World::from_config(&config),
    );
    (config, snapshot)
}

#[test]
fn bank_deposit_of_all_cash() {
    let (_, mut game) = new_game();
    game.player.cash = 500;
    let bank_before = game.player.bank;
    bank::deposit(&mut game.player, 500).unwrap();
    assert_eq!(game.player.cash, 0);
    assert_eq!(game.player.bank, bank_before + 500);
}

#[test]
fn a_day_in_the_life() {
    let (config, mut game) = new_game();
    let mut rng = seeded(2024);
    let mut now = 1_700_000_000_000_u64;

    let report =
        commit_crime_by_id(&mut game.player, &config.crimes, "pickpocket", now, &mut rng).unwrap();
    match report.outcome {
        CrimeOutcome::Success { .. } => assert!(game.player.experience > 0),
        CrimeOutcome::Caught { release_at } => {
            let timers = game.player.countdowns(now);
            assert!(timers.iter().any(|(_, c)| c.kind == CountdownKind::Prison));
            now = release_at;
        }
    }
    game.player.settle(now);
    assert!(!game.player.is_jailed(now));

    game.player.cash = 5_000;
    let journey = depart(&mut game.player, &config.cities, "new-york", now).unwrap();
    let timers = game.player.countdowns(now);
    assert!(timers.iter().any(|(_, c)| c.kind == CountdownKind::Travel));
    let landed = game.player.settle(journey.arrive_at);
    assert_eq!(landed.arrived.as_deref(), Some("new-york"));

    let recipient = game.world.roster[0].name.clone();
    game.world
        .send_mail(
            &game.player,
            MailDraft {
                to: recipient.clone(),
                subject: String::from("An offer"),
                body: String::from("One you can't refuse."),
            },
            now,
            &config.mail,
        )
        .unwrap();
    assert_eq!(game.world.mailbox.unread_count(&recipient), 1);

    game.world.chat.post("Vito", "Buongiorno", now).unwrap();
    game.world.market.tick(&mut rng);

    let saved = serde_json::to_string(&game).unwrap();
    let restored: GameSnapshot = serde_json::from_str(&saved).unwrap();
    assert_eq!(restored, game);
}
