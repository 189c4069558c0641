//! Modifier engine (flattened scalar bundles).
//!
//! Converts heterogeneous inputs - player ratings, badges, coaching scheme
//! fit, facility bonuses, weather, home-field setting - into the numeric
//! adjustments the play resolver consumes, so the resolver never reads raw
//! roster structures. Team bundles are computed once at game start and
//! situational badge bonuses are re-evaluated before each play.

use crate::engine::constants::ratings;
use crate::engine::game_state::GameState;
use crate::models::{
    BonusStat, GameSettings, Player, PlayerAttributes, Position, SimTeam, SituationTag, TeamSide,
    TriggeredEffect,
};

// ============================================================================
// Personnel (depth-chart snapshot)
// ============================================================================

/// Key players the resolver draws from for one side, replacement-filled.
///
/// Chosen once at `initialize_game_modifiers()`; rosters are read-only
/// during a game so the snapshot cannot go stale.
#[derive(Debug, Clone)]
pub struct Personnel {
    pub quarterback: Player,
    /// Ball carriers, best first (at least one entry).
    pub rushers: Vec<Player>,
    /// Pass catchers, best first (at least one entry).
    pub receivers: Vec<Player>,
    /// Defenders used for tackle/turnover attribution, best first.
    pub defenders: Vec<Player>,
    pub kicker: Player,
    pub punter: Player,
    pub returner: Player,
}

impl Personnel {
    pub fn from_team(team: &SimTeam) -> Self {
        let quarterback = team.starter_or_replacement(Position::QB);

        let mut rushers: Vec<Player> = team
            .depth_chart(Position::RB)
            .into_iter()
            .take(2)
            .cloned()
            .collect();
        if rushers.is_empty() {
            rushers.push(Player::replacement_level(Position::RB));
        }

        let mut receivers: Vec<Player> = team
            .depth_chart(Position::WR)
            .into_iter()
            .take(3)
            .cloned()
            .collect();
        receivers.extend(team.depth_chart(Position::TE).into_iter().take(1).cloned());
        if receivers.is_empty() {
            receivers.push(Player::replacement_level(Position::WR));
        }

        let mut defenders: Vec<Player> = [Position::DL, Position::LB, Position::CB, Position::S]
            .iter()
            .flat_map(|&pos| team.depth_chart(pos).into_iter().take(3).cloned().collect::<Vec<_>>())
            .collect();
        if defenders.is_empty() {
            defenders.push(Player::replacement_level(Position::LB));
        }

        let kicker = team.starter_or_replacement(Position::K);
        // Teams without a punter send out the kicker.
        let punter = team
            .starter(Position::P)
            .cloned()
            .unwrap_or_else(|| kicker.clone());

        // Fastest skill player fields kicks.
        let returner = team
            .players
            .iter()
            .filter(|p| p.position.is_skill_position())
            .max_by_key(|p| (p.attrs().speed, std::cmp::Reverse(p.id.clone())))
            .cloned()
            .unwrap_or_else(|| Player::replacement_level(Position::WR));

        Self {
            quarterback,
            rushers,
            receivers,
            defenders,
            kicker,
            punter,
            returner,
        }
    }
}

// ============================================================================
// Team Modifier Bundle
// ============================================================================

/// Flattened per-team adjustment bundle consumed by the play resolver.
///
/// Effective-strength fields are on the 0-99 rating scale (badge bonuses
/// may push them slightly past 99; probability math clamps). Multipliers
/// default to 1.0 and additive chances to 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamGameModifiers {
    pub pass_offense: f32,
    pub rush_offense: f32,
    pub pass_defense: f32,
    pub rush_defense: f32,
    pub pass_rush: f32,
    pub pass_block: f32,
    pub kicking: f32,
    pub punting: f32,
    /// Weather/home multiplier on completion probability.
    pub pass_accuracy_mult: f32,
    /// Weather multiplier on kick distance and accuracy.
    pub kicking_mult: f32,
    /// Additive fumble chance (wet ball).
    pub fumble_chance_add: f32,
    /// Multiplier on penalty rate (disciplined teams draw fewer flags).
    pub penalty_mult: f32,
    /// Head-coach 4th-down aggressiveness, passed through to the play-call
    /// chart (0.0-1.0).
    pub aggressiveness: f32,
}

impl Default for TeamGameModifiers {
    fn default() -> Self {
        Self {
            pass_offense: 60.0,
            rush_offense: 60.0,
            pass_defense: 60.0,
            rush_defense: 60.0,
            pass_rush: 60.0,
            pass_block: 60.0,
            kicking: 60.0,
            punting: 60.0,
            pass_accuracy_mult: 1.0,
            kicking_mult: 1.0,
            fumble_chance_add: 0.0,
            penalty_mult: 1.0,
            aggressiveness: 0.5,
        }
    }
}

/// Depth-chart weights: starters dominate the composite.
const DEPTH_WEIGHTS: [f32; 3] = [1.0, 0.5, 0.25];

/// Weighted average of an attribute over a position group (top 3 by depth),
/// including always-on badge bonuses. Empty groups read as replacement
/// level.
fn group_average(team: &SimTeam, position: Position, stat: BonusStat) -> f32 {
    let chart = team.depth_chart(position);
    if chart.is_empty() {
        return 40.0;
    }
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for (player, weight) in chart.iter().zip(DEPTH_WEIGHTS.iter()) {
        weighted += effective_attr(player, stat, &[SituationTag::Always]) * weight;
        total_weight += weight;
    }
    weighted / total_weight
}

/// Attribute value with badge bonuses for the given active situations.
pub fn effective_attr(player: &Player, stat: BonusStat, situations: &[SituationTag]) -> f32 {
    raw_attr(&player.attrs(), stat) + player.traits.stat_bonus_in(stat, situations)
}

fn raw_attr(attrs: &PlayerAttributes, stat: BonusStat) -> f32 {
    let v = match stat {
        BonusStat::Speed => attrs.speed,
        BonusStat::Strength => attrs.strength,
        BonusStat::Agility => attrs.agility,
        BonusStat::Awareness => attrs.awareness,
        BonusStat::ThrowPower => attrs.throw_power,
        BonusStat::ThrowAccuracy => attrs.throw_accuracy,
        BonusStat::Catching => attrs.catching,
        BonusStat::Carrying => attrs.carrying,
        BonusStat::Tackling => attrs.tackling,
        BonusStat::Coverage => attrs.coverage,
        BonusStat::PassRush => attrs.pass_rush,
        BonusStat::PassBlock => attrs.pass_block,
        BonusStat::KickPower => attrs.kick_power,
        BonusStat::KickAccuracy => attrs.kick_accuracy,
        BonusStat::Stamina => attrs.stamina,
    };
    v as f32
}

/// Build one side's bundle from roster composites, weather, home field,
/// and the coaching/facility bundles attached to the team.
pub fn initialize_team_modifiers(
    team: &SimTeam,
    personnel: &Personnel,
    settings: &GameSettings,
    is_home: bool,
) -> TeamGameModifiers {
    let coaching = team.coaching.sanitized();
    let facilities = team.facilities.sanitized();
    let always = [SituationTag::Always];

    let qb = &personnel.quarterback;
    let receiver_catching: f32 = {
        let sum: f32 = personnel
            .receivers
            .iter()
            .map(|p| effective_attr(p, BonusStat::Catching, &always))
            .sum();
        sum / personnel.receivers.len() as f32
    };

    let mut pass_offense = effective_attr(qb, BonusStat::ThrowAccuracy, &always) * 0.5
        + effective_attr(qb, BonusStat::ThrowPower, &always) * 0.2
        + receiver_catching * 0.3;

    let lead_back = &personnel.rushers[0];
    let mut rush_offense = effective_attr(lead_back, BonusStat::Speed, &always) * 0.3
        + effective_attr(lead_back, BonusStat::Strength, &always) * 0.25
        + effective_attr(lead_back, BonusStat::Agility, &always) * 0.2
        + group_average(team, Position::OL, BonusStat::Strength) * 0.25;

    let mut pass_defense = group_average(team, Position::CB, BonusStat::Coverage) * 0.45
        + group_average(team, Position::S, BonusStat::Coverage) * 0.30
        + group_average(team, Position::LB, BonusStat::Coverage) * 0.25;

    let mut rush_defense = group_average(team, Position::DL, BonusStat::Tackling) * 0.40
        + group_average(team, Position::LB, BonusStat::Tackling) * 0.35
        + group_average(team, Position::DL, BonusStat::Strength) * 0.25;

    let pass_rush = group_average(team, Position::DL, BonusStat::PassRush) * 0.75
        + group_average(team, Position::LB, BonusStat::PassRush) * 0.25;
    let pass_block = group_average(team, Position::OL, BonusStat::PassBlock);

    let kicking = effective_attr(&personnel.kicker, BonusStat::KickAccuracy, &always) * 0.6
        + effective_attr(&personnel.kicker, BonusStat::KickPower, &always) * 0.4;
    let punting = effective_attr(&personnel.punter, BonusStat::KickPower, &always);

    // Scheme fit scales the unit it belongs to a few percent either way.
    pass_offense *= scheme_factor(coaching.offense_scheme_fit);
    rush_offense *= scheme_factor(coaching.offense_scheme_fit);
    pass_defense *= scheme_factor(coaching.defense_scheme_fit);
    rush_defense *= scheme_factor(coaching.defense_scheme_fit);

    // Training facilities: small flat bump on both sides of the ball.
    let training_bump = (facilities.training - 0.5) * 2.0;
    pass_offense += training_bump;
    rush_offense += training_bump;
    pass_defense += training_bump;
    rush_defense += training_bump;

    // Home field: crowd noise helps the defense most, scaled by the
    // game-level intensity setting and the stadium factor.
    if is_home {
        let bonus =
            1.5 * settings.home_field_intensity.factor() * (0.5 + facilities.home_crowd);
        pass_offense += bonus * 0.5;
        rush_offense += bonus * 0.5;
        pass_defense += bonus;
        rush_defense += bonus;
    }

    // Discipline proxies off awareness across the roster.
    let awareness_avg = {
        let sum: f32 = team
            .players
            .iter()
            .map(|p| p.attrs().awareness as f32)
            .sum();
        sum / team.players.len() as f32
    };
    let penalty_mult = (1.3 - ratings::normalize(awareness_avg) * 0.6).clamp(0.7, 1.3);

    TeamGameModifiers {
        pass_offense,
        rush_offense,
        pass_defense,
        rush_defense,
        pass_rush,
        pass_block,
        kicking,
        punting,
        pass_accuracy_mult: settings.weather.passing_factor(),
        kicking_mult: settings.weather.kicking_factor(),
        fumble_chance_add: settings.weather.fumble_bonus(),
        penalty_mult,
        aggressiveness: coaching.aggressiveness,
    }
}

fn scheme_factor(fit: f32) -> f32 {
    0.97 + fit * 0.06
}

// ============================================================================
// Situational Evaluation
// ============================================================================

/// Clutch: late in the 4th quarter or any overtime, margin within one
/// score. Read-only query also exposed by the orchestrator for UI use.
pub fn is_clutch(state: &GameState) -> bool {
    use crate::engine::constants::situations;
    if state.is_over {
        return false;
    }
    let close = state.margin_for(state.possession).abs() <= situations::CLUTCH_MARGIN;
    let late = (state.quarter == 4 && state.clock <= situations::CLUTCH_CLOCK_SECS)
        || state.overtime;
    close && late
}

/// Situations active for the play about to be resolved.
pub fn active_situations(state: &GameState, settings: &GameSettings) -> Vec<SituationTag> {
    let mut tags = vec![SituationTag::Always];
    if is_clutch(state) {
        tags.push(SituationTag::Clutch);
    }
    if state.in_red_zone() {
        tags.push(SituationTag::RedZone);
    }
    if settings.game_type.is_prime_time() {
        tags.push(SituationTag::PrimeTime);
    }
    tags
}

/// Badge activations for a player under the current situations, excluding
/// always-on badges (those are folded into the game-start bundles and are
/// not "news").
pub fn situational_effects_for(
    player: &Player,
    side: TeamSide,
    situations: &[SituationTag],
) -> Vec<TriggeredEffect> {
    player
        .traits
        .equipped()
        .filter(|t| {
            t.id.situation() != SituationTag::Always && situations.contains(&t.id.situation())
        })
        .map(|t| TriggeredEffect {
            team: side,
            player_id: Some(player.id.clone()),
            trait_id: t.id,
            description: format!("{} activated for {}", t.display_name(), player.name),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trait_system::{EquippedTrait, TraitId, TraitSlots};
    use crate::models::{CoachingStaff, FacilityBonus, GameType};

    fn player(id: &str, position: Position, overall: u8) -> Player {
        Player {
            id: id.to_string(),
            name: id.to_string(),
            position,
            overall,
            attributes: Some(PlayerAttributes::flat(overall)),
            traits: TraitSlots::default(),
        }
    }

    fn team(overall: u8) -> SimTeam {
        let mut players = vec![
            player("qb", Position::QB, overall),
            player("rb", Position::RB, overall),
            player("wr1", Position::WR, overall),
            player("wr2", Position::WR, overall),
            player("te", Position::TE, overall),
            player("ol1", Position::OL, overall),
            player("k", Position::K, overall),
            player("p", Position::P, overall),
        ];
        for (i, pos) in [Position::DL, Position::LB, Position::CB, Position::S]
            .iter()
            .enumerate()
        {
            players.push(player(&format!("d{}", i), *pos, overall));
        }
        SimTeam {
            id: "t".into(),
            name: "Team".into(),
            abbreviation: "TM".into(),
            players,
            coaching: CoachingStaff::default(),
            facilities: FacilityBonus::default(),
        }
    }

    fn settings() -> GameSettings {
        GameSettings::default()
    }

    #[test]
    fn test_personnel_fills_missing_slots() {
        let mut t = team(75);
        t.players.retain(|p| p.position != Position::K && p.position != Position::P);
        let personnel = Personnel::from_team(&t);
        assert_eq!(personnel.kicker.overall, 40);
        // No punter either: kicker (replacement) doubles as punter.
        assert_eq!(personnel.punter.position, Position::K);
    }

    #[test]
    fn test_better_roster_yields_stronger_bundle() {
        let strong = team(90);
        let weak = team(60);
        let s = initialize_team_modifiers(&strong, &Personnel::from_team(&strong), &settings(), false);
        let w = initialize_team_modifiers(&weak, &Personnel::from_team(&weak), &settings(), false);
        assert!(s.pass_offense > w.pass_offense);
        assert!(s.rush_defense > w.rush_defense);
        assert!(s.kicking > w.kicking);
    }

    #[test]
    fn test_home_field_bonus_applies() {
        let t = team(75);
        let personnel = Personnel::from_team(&t);
        let home = initialize_team_modifiers(&t, &personnel, &settings(), true);
        let away = initialize_team_modifiers(&t, &personnel, &settings(), false);
        assert!(home.pass_defense > away.pass_defense);
    }

    #[test]
    fn test_clutch_requires_late_and_close() {
        let mut state = GameState::new(TeamSide::Home);
        state.quarter = 4;
        state.clock = 200;
        assert!(is_clutch(&state)); // tied counts as close

        state.add_points(TeamSide::Home, 21);
        assert!(!is_clutch(&state)); // blowout

        let mut early = GameState::new(TeamSide::Home);
        early.quarter = 2;
        early.clock = 100;
        assert!(!is_clutch(&early)); // close but not late
    }

    #[test]
    fn test_overtime_is_always_clutch_when_close() {
        let mut state = GameState::new(TeamSide::Home);
        state.quarter = 5;
        state.overtime = true;
        state.clock = 600;
        assert!(is_clutch(&state));
    }

    #[test]
    fn test_situational_effects_only_fire_when_active() {
        let mut p = player("wr", Position::WR, 80);
        p.traits = TraitSlots::from_traits(&[EquippedTrait::gold(TraitId::RedZoneMagnet)]);

        let quiet = situational_effects_for(&p, TeamSide::Home, &[SituationTag::Always]);
        assert!(quiet.is_empty());

        let red_zone = situational_effects_for(
            &p,
            TeamSide::Home,
            &[SituationTag::Always, SituationTag::RedZone],
        );
        assert_eq!(red_zone.len(), 1);
        assert_eq!(red_zone[0].trait_id, TraitId::RedZoneMagnet);
    }

    #[test]
    fn test_prime_time_situation_from_settings() {
        let state = GameState::new(TeamSide::Home);
        let prime = GameSettings {
            game_type: GameType::PrimeTime,
            ..Default::default()
        };
        assert!(active_situations(&state, &prime).contains(&SituationTag::PrimeTime));
        assert!(!active_situations(&state, &settings()).contains(&SituationTag::PrimeTime));
    }
}
