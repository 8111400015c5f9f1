//! Shootouts against roster players in the same city.
use super::{PanelProps, announce, apply, status_line};
use crate::components::{Button, CountdownBadge};
use crate::game::attack::ATTACK_ACTIVITY;
use crate::game::{
    AttackPhase, AttackReport, AttackStep, CountdownKind, GameSnapshot, attack, attack_chance,
};
use yew::prelude::*;

fn outcome_text(report: &AttackReport, target: &str) -> String {
    if report.success {
        format!("{target} is down. Rolled {} under {}%", report.roll, report.chance)
    } else {
        format!("{target} got away. Rolled {} against {}%", report.roll, report.chance)
    }
}

/// First scheduled step after `reached`.
fn next_step(report: &AttackReport, reached: Option<AttackPhase>) -> Option<AttackStep> {
    report
        .steps
        .iter()
        .copied()
        .find(|step| Some(step.phase) > reached)
}

#[derive(Properties, PartialEq, Clone)]
struct SequenceProps {
    report: AttackReport,
    target: AttrValue,
    now_ms: u64,
    #[prop_or_default]
    on_revealed: Callback<()>,
}

/// Plays the report's steps in order, one countdown per step.
#[function_component(AttackSequence)]
fn attack_sequence(p: &SequenceProps) -> Html {
    // Latest phase reached, with the time it was reached.
    let reached = use_state(|| (p.report.phase_at(p.now_ms), p.now_ms));
    let (phase, reached_at) = *reached;

    let pending = next_step(&p.report, phase).map(|step| {
        let on_expired = {
            let reached = reached.clone();
            let on_revealed = p.on_revealed.clone();
            Callback::from(move |()| {
                reached.set((Some(step.phase), step.at_ms));
                if step.phase == AttackPhase::Outcome {
                    on_revealed.emit(());
                }
            })
        };
        html! {
            <CountdownBadge
                key={step.at_ms}
                end_ms={step.at_ms}
                kind={CountdownKind::Attack}
                now_ms={reached_at.max(p.now_ms)}
                label={AttrValue::from(step.phase.label())}
                {on_expired}
            />
        }
    });

    html! {
        <div class="attack__sequence" aria-live="polite">
            <ol>
                { for AttackPhase::SEQUENCE.iter().map(|step| html! {
                    <li class={classes!((phase >= Some(*step)).then_some("reached"))}>
                        { step.label() }
                    </li>
                }) }
            </ol>
            if phase == Some(AttackPhase::Outcome) {
                <p class="attack__outcome">{ outcome_text(&p.report, &p.target) }</p>
            } else {
                { pending.unwrap_or_default() }
            }
        </div>
    }
}

#[function_component(AttackPanel)]
pub fn attack_panel(p: &PanelProps) -> Html {
    let status = use_state(String::new);
    let last = use_state(|| None::<(AttackReport, String)>);
    let player = &p.game.player;
    let rules = &p.config.attack;

    let on_attack = {
        let status = status.clone();
        let last = last.clone();
        let game = p.game.clone();
        let config = p.config.clone();
        let rng = p.rng.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |target_id: String| {
            let now = crate::clock::now_ms();
            let result = apply(&game, &on_change, |g| {
                let GameSnapshot { player, world, .. } = g;
                let target = world.user_mut(&target_id)?;
                let name = target.name.clone();
                attack(player, target, &config.attack, now, &mut *rng.borrow_mut())
                    .map(|report| (report, name))
            });
            match result {
                Ok((report, name)) => {
                    announce(&status, format!("{} {name}", AttackPhase::Aim.label()));
                    last.set(Some((report, name)));
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let on_reveal = {
        let status = status.clone();
        let last = last.clone();
        Callback::from(move |()| {
            if let Some((report, name)) = (*last).as_ref() {
                announce(&status, outcome_text(report, name));
            }
        })
    };

    let sequence = (*last).as_ref().map_or_else(Html::default, |(report, name)| {
        html! {
            <AttackSequence
                key={report.steps.first().map_or(0, |step| step.at_ms)}
                report={report.clone()}
                target={AttrValue::from(name.clone())}
                now_ms={p.now_ms}
                on_revealed={on_reveal.clone()}
            />
        }
    });

    let cooldown = player
        .cooldown_remaining(ATTACK_ACTIVITY, p.now_ms)
        .map(|left| html! {
            <p class="attack__cooldown">
                <CountdownBadge end_ms={p.now_ms.saturating_add(left)} kind={CountdownKind::Cooldown} now_ms={p.now_ms} label={AttrValue::from("Reload")} />
            </p>
        })
        .unwrap_or_default();
    let blocked = player.ensure_free(p.now_ms).is_err()
        || player.cooldown_remaining(ATTACK_ACTIVITY, p.now_ms).is_some()
        || player.bullets < rules.bullets_per_attack;

    html! {
        <section class="panel attack" aria-label="Attack">
            <p>{ format!("Bullets: {} ({} per attack)", player.bullets, rules.bullets_per_attack) }</p>
            { cooldown }
            <table>
                <thead>
                    <tr><th>{"Target"}</th><th>{"Rank"}</th><th>{"Family"}</th><th>{"Chance"}</th><th></th></tr>
                </thead>
                <tbody>
                    { for p.game.world.users_in(&player.location).map(|user| {
                        let onclick = {
                            let on_attack = on_attack.clone();
                            let id = user.id.clone();
                            Callback::from(move |_: MouseEvent| on_attack.emit(id.clone()))
                        };
                        let chance = attack_chance(player.rank(), user.rank, rules);
                        let down = user.health == 0;
                        html! {
                            <tr key={user.id.clone()}>
                                <td>{ user.name.clone() }</td>
                                <td>{ user.rank.label() }</td>
                                <td>{ user.family.clone().unwrap_or_default() }</td>
                                <td>{ format!("{chance}%") }</td>
                                <td>
                                    if down {
                                        <span class="attack__down">{"Down"}</span>
                                    } else {
                                        <Button label="Attack" disabled={blocked} {onclick} />
                                    }
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            { sequence }
            { status_line(&status) }
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ui::fixtures::{NOW, props, props_with};
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn lists_only_local_targets() {
        let html = block_on(LocalServerRenderer::<AttackPanel>::with_props(props()).render());
        assert!(html.contains("Virgil Sollozzo"), "{html}");
        assert!(html.contains("Mark McCluskey"), "{html}");
        assert!(!html.contains("Hyman Roth"), "{html}");
        assert!(html.contains("Bullets: 20 (5 per attack)"), "{html}");
    }

    #[test]
    fn downed_target_and_cooldown() {
        let base = props();
        let mut game = (*base.game).clone();
        game.world.user_mut("u-mccluskey").unwrap().health = 0;
        game.player.start_cooldown(ATTACK_ACTIVITY, NOW, 300);
        let props = props_with(game, (*base.config).clone());
        let html = block_on(LocalServerRenderer::<AttackPanel>::with_props(props).render());
        assert!(html.contains("Down"), "{html}");
        assert!(html.contains("Reload: "), "{html}");
        assert!(html.contains("5m 0s"), "{html}");
    }

    fn report() -> AttackReport {
        AttackReport {
            target_id: "u-sollozzo".into(),
            chance: 30,
            roll: 12,
            success: true,
            steps: AttackPhase::SEQUENCE
                .iter()
                .zip(1_u64..)
                .map(|(&phase, n)| AttackStep {
                    phase,
                    at_ms: NOW + 800 * n,
                })
                .collect(),
        }
    }

    fn render_sequence(now_ms: u64) -> String {
        let props = SequenceProps {
            report: report(),
            target: AttrValue::from("Virgil Sollozzo"),
            now_ms,
            on_revealed: Callback::noop(),
        };
        block_on(LocalServerRenderer::<AttackSequence>::with_props(props).render())
    }

    #[test]
    fn steps_follow_in_order() {
        let report = report();
        assert_eq!(next_step(&report, None).map(|s| s.phase), Some(AttackPhase::Aim));
        assert_eq!(
            next_step(&report, Some(AttackPhase::Aim)).map(|s| s.at_ms),
            Some(NOW + 1_600)
        );
        assert_eq!(next_step(&report, Some(AttackPhase::Outcome)), None);
    }

    #[test]
    fn sequence_waits_on_the_next_step() {
        let html = render_sequence(NOW);
        assert_eq!(html.matches("class=\"reached\"").count(), 0, "{html}");
        assert!(html.contains("Taking aim…: "), "{html}");

        let html = render_sequence(NOW + 1_000);
        assert_eq!(html.matches("class=\"reached\"").count(), 1, "{html}");
        assert!(html.contains("Shots fired!: "), "{html}");
        assert!(!html.contains("is down"), "{html}");

        let html = render_sequence(NOW + 2_400);
        assert_eq!(html.matches("class=\"reached\"").count(), 3, "{html}");
        assert!(html.contains("Virgil Sollozzo is down"), "{html}");
    }

    #[test]
    fn outcome_text_reports_roll() {
        let report = AttackReport {
            target_id: "u-sollozzo".into(),
            chance: 30,
            roll: 12,
            success: true,
            steps: vec![AttackStep {
                phase: AttackPhase::Outcome,
                at_ms: NOW,
            }],
        };
        assert_eq!(
            outcome_text(&report, "Virgil Sollozzo"),
            "Virgil Sollozzo is down. Rolled 12 under 30%"
        );
    }
}
