use super::{PanelProps, announce, apply, format_money, status_line};
use crate::components::CountdownBadge;
use crate::game::countdown::format_remaining;
use crate::game::{CountdownKind, CrimeDef, CrimeOutcome, CrimeReport, commit_crime_by_id};
use yew::prelude::*;

fn describe(crime: &str, report: &CrimeReport, now_ms: u64) -> String {
    match report.outcome {
        CrimeOutcome::Success { payout, experience } => {
            format!("{crime}: success! +{} and {experience} experience", format_money(payout))
        }
        CrimeOutcome::Caught { release_at } => format!(
            "{crime}: caught by the police. Prison for {}",
            format_remaining(release_at.saturating_sub(now_ms))
        ),
    }
}

fn crime_row(
    crime: &CrimeDef,
    p: &PanelProps,
    blocked: bool,
    on_commit: &Callback<String>,
) -> Html {
    let cooldown = p
        .game
        .player
        .cooldown_remaining(&crime.activity(), p.now_ms)
        .map(|left| p.now_ms.saturating_add(left));
    let onclick = {
        let on_commit = on_commit.clone();
        let id = crime.id.clone();
        Callback::from(move |_: MouseEvent| on_commit.emit(id.clone()))
    };
    html! {
        <tr key={crime.id.clone()}>
            <td>{ crime.name.clone() }</td>
            <td>{ format!("{}%", crime.success_pct) }</td>
            <td>{ format!("{} - {}", format_money(crime.payout_min), format_money(crime.payout_max)) }</td>
            <td>
                {
                    cooldown.map_or_else(
                        || html! { <button type="button" disabled={blocked} {onclick}>{"Commit"}</button> },
                        |end_ms| html! {
                            <CountdownBadge {end_ms} kind={CountdownKind::Cooldown} now_ms={p.now_ms} />
                        },
                    )
                }
            </td>
        </tr>
    }
}

#[function_component(CrimePanel)]
pub fn crime_panel(p: &PanelProps) -> Html {
    let status = use_state(String::new);
    let player = &p.game.player;
    let blocked = player.ensure_free(p.now_ms).is_err();

    let on_commit = {
        let status = status.clone();
        let game = p.game.clone();
        let config = p.config.clone();
        let rng = p.rng.clone();
        let on_change = p.on_state_change.clone();
        Callback::from(move |id: String| {
            let now = crate::clock::now_ms();
            match apply(&game, &on_change, |g| {
                commit_crime_by_id(&mut g.player, &config.crimes, &id, now, &mut *rng.borrow_mut())
            }) {
                Ok(report) => {
                    let name = crate::game::crime::find_crime(&config.crimes, &id)
                        .map_or(id.as_str(), |c| c.name.as_str());
                    announce(&status, describe(name, &report, now));
                }
                Err(err) => announce(&status, err.to_string()),
            }
        })
    };

    let prison = player
        .prison_until
        .filter(|&until| p.now_ms < until)
        .map(|end_ms| html! {
            <p class="crime__prison">
                {"You are behind bars. "}
                <CountdownBadge {end_ms} kind={CountdownKind::Prison} now_ms={p.now_ms} label={AttrValue::from("Release")} />
            </p>
        })
        .unwrap_or_default();

    html! {
        <section class="panel crimes" aria-label="Crimes">
            { prison }
            <table>
                <thead>
                    <tr><th>{"Crime"}</th><th>{"Chance"}</th><th>{"Payout"}</th><th></th></tr>
                </thead>
                <tbody>
                    { for p.config.crimes.iter().map(|crime| crime_row(crime, p, blocked, &on_commit)) }
                </tbody>
            </table>
            { status_line(&status) }
        </section>
    }
}
