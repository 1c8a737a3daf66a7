//! Combat events and their presentation
//!
//! Resolution code never formats text. It reports what happened as
//! [`CombatEvent`]s through a [`CombatSink`], and reports properties revealed
//! by use through [`CombatSink::notice_property`]. A [`Presenter`] turns
//! events into messages for a [`Notifier`]; a [`MessageLog`] simply keeps
//! them for inspection.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::critical::CriticalTier;
use crate::object::{BrandKind, ObjectProperty};
use crate::world::Grid;

/// Which item a noticed property belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemRef {
    Weapon,
    Launcher,
    Ring(u8),
    Shield,
    /// The projectile in flight
    Missile,
}

/// Side effects of a chaotic weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum ChaosEffect {
    Confuse,
    Stun,
    Slow,
    Teleport,
}

/// Something that happened during an attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// Declined to attack a peaceful monster
    PushPast { monster: String },
    /// Too frightened to fight
    TooAfraid { monster: String },
    Miss { monster: String, visible: bool },
    Hit {
        monster: String,
        visible: bool,
        tier: CriticalTier,
        damage: i32,
        verb: Option<String>,
    },
    ShieldBash { monster: String, damage: i32 },
    BashStun { monster: String },
    BashConfuse { monster: String },
    Stumble,
    ManaBurn { monster: String, drained: i32 },
    Confused { monster: String },
    /// A special attack had no effect
    Unaffected { monster: String },
    BlackBreath { monster: String },
    Chaos { monster: String, effect: ChaosEffect },
    HolyFades,
    ImmunityRevealed { monster: String, brand: BrandKind },
    Killed { monster: String, verb: String },
    /// The monster flees in terror
    Flees { monster: String },
    /// Hit-and-run: the player escapes after the blow
    PlayerFlees,
    SpeedBoost { amount: i32 },
    Earthquake { grid: Grid },
    MissileMiss { missile: String, monster: String },
    MissileHit {
        missile: String,
        monster: String,
        visible: bool,
        tier: CriticalTier,
        damage: i32,
    },
    Pierces { missile: String },
    Supershot,
    Breaks { missile: String },
    Lands { missile: String, grid: Grid },
}

/// Message categories, also used to select sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum MessageKind {
    Hit,
    Miss,
    Kill,
    Flee,
    Effect,
    Item,
    Generic,
}

impl CombatEvent {
    pub fn kind(&self) -> MessageKind {
        match self {
            CombatEvent::Hit { .. }
            | CombatEvent::MissileHit { .. }
            | CombatEvent::ShieldBash { .. } => MessageKind::Hit,
            CombatEvent::Miss { .. } | CombatEvent::MissileMiss { .. } => MessageKind::Miss,
            CombatEvent::Killed { .. } => MessageKind::Kill,
            CombatEvent::Flees { .. } | CombatEvent::PlayerFlees => MessageKind::Flee,
            CombatEvent::Breaks { .. } | CombatEvent::Lands { .. } => MessageKind::Item,
            CombatEvent::PushPast { .. } | CombatEvent::TooAfraid { .. } | CombatEvent::Stumble => {
                MessageKind::Generic
            }
            _ => MessageKind::Effect,
        }
    }

    /// Whether the player can see the target of this event
    pub fn visible(&self) -> bool {
        match self {
            CombatEvent::Miss { visible, .. }
            | CombatEvent::Hit { visible, .. }
            | CombatEvent::MissileHit { visible, .. } => *visible,
            _ => true,
        }
    }
}

/// Receiver of combat events and identify-by-use notices
pub trait CombatSink {
    fn emit(&mut self, event: CombatEvent);

    /// A property of an item was revealed by use
    fn notice_property(&mut self, _property: ObjectProperty, _item: ItemRef) {}
}

/// Collects events and notices in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageLog {
    pub events: Vec<CombatEvent>,
    pub notices: Vec<(ObjectProperty, ItemRef)>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn noticed(&self, property: ObjectProperty) -> bool {
        self.notices.iter().any(|(p, _)| *p == property)
    }

    pub fn count(&self, pred: impl Fn(&CombatEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl CombatSink for MessageLog {
    fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    fn notice_property(&mut self, property: ObjectProperty, item: ItemRef) {
        self.notices.push((property, item));
    }
}

/// Messaging collaborator: shows text and plays sounds
pub trait Notifier {
    fn notify(&mut self, kind: MessageKind, text: &str, visible: bool);

    fn play_sound(&mut self, _kind: MessageKind) {}
}

impl Notifier for Vec<String> {
    fn notify(&mut self, _kind: MessageKind, text: &str, _visible: bool) {
        self.push(text.to_string());
    }
}

/// Renders events as they arrive
#[derive(Debug, Default)]
pub struct Presenter<N: Notifier> {
    notifier: N,
    notices: Vec<(ObjectProperty, ItemRef)>,
}

impl<N: Notifier> Presenter<N> {
    pub fn new(notifier: N) -> Self {
        Self {
            notifier,
            notices: Vec::new(),
        }
    }

    pub fn notices(&self) -> &[(ObjectProperty, ItemRef)] {
        &self.notices
    }

    pub fn into_inner(self) -> N {
        self.notifier
    }
}

impl<N: Notifier> CombatSink for Presenter<N> {
    fn emit(&mut self, event: CombatEvent) {
        let kind = event.kind();
        if matches!(kind, MessageKind::Hit | MessageKind::Miss | MessageKind::Kill) {
            self.notifier.play_sound(kind);
        }
        self.notifier.notify(kind, &describe_event(&event), event.visible());
    }

    fn notice_property(&mut self, property: ObjectProperty, item: ItemRef) {
        self.notices.push((property, item));
    }
}

fn the(monster: &str, visible: bool) -> String {
    if visible {
        format!("the {}", monster)
    } else {
        "it".to_string()
    }
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Player-facing text for an event
pub fn describe_event(event: &CombatEvent) -> String {
    match event {
        CombatEvent::PushPast { monster } => format!("You push past the {}.", monster),
        CombatEvent::TooAfraid { monster } => {
            format!("You are too afraid to attack the {}!", monster)
        }
        CombatEvent::Miss { monster, visible } => {
            format!("You miss {}.", the(monster, *visible))
        }
        CombatEvent::Hit {
            monster,
            visible,
            tier,
            damage,
            verb,
        } => {
            let target = the(monster, *visible);
            let mut text = match verb {
                Some(verb) => format!("You {} {}.", verb, target),
                None => format!("You hit {}.", target),
            };
            if let Some(crit) = tier.message() {
                text.push(' ');
                text.push_str(crit);
            }
            if *damage == 0 {
                text.push_str(" It is unharmed.");
            }
            text
        }
        CombatEvent::ShieldBash { monster, .. } => {
            format!("You get in a shield bash on the {}!", monster)
        }
        CombatEvent::BashStun { monster } => format!("The {} is stunned.", monster),
        CombatEvent::BashConfuse { monster } => format!("The {} appears confused.", monster),
        CombatEvent::Stumble => "You stumble!".to_string(),
        CombatEvent::ManaBurn { monster, .. } => {
            format!("You burn the {}'s magical energy!", monster)
        }
        CombatEvent::Confused { monster } => format!("The {} appears confused.", monster),
        CombatEvent::Unaffected { monster } => format!("The {} is unaffected.", monster),
        CombatEvent::BlackBreath { monster } => {
            format!("The {} is struck by the Black Breath!", monster)
        }
        CombatEvent::Chaos { monster, effect } => match effect {
            ChaosEffect::Confuse => format!("Chaos swirls around the {}.", monster),
            ChaosEffect::Stun => format!("The {} reels from the blow.", monster),
            ChaosEffect::Slow => format!("The {} starts moving slower.", monster),
            ChaosEffect::Teleport => format!("The {} disappears!", monster),
        },
        CombatEvent::HolyFades => "The holy aura leaves your weapon.".to_string(),
        CombatEvent::ImmunityRevealed { monster, brand } => {
            format!("The {} is immune to {}.", monster, brand.to_string().to_lowercase())
        }
        CombatEvent::Killed { monster, verb } => {
            format!("The {} {}.", monster, verb)
        }
        CombatEvent::Flees { monster } => format!("The {} flees in terror!", monster),
        CombatEvent::PlayerFlees => "You flee laughing!".to_string(),
        CombatEvent::SpeedBoost { .. } => "You feel a surge of speed!".to_string(),
        CombatEvent::Earthquake { .. } => "The ground shakes!".to_string(),
        CombatEvent::MissileMiss { missile, monster } => {
            format!("The {} misses the {}.", missile, monster)
        }
        CombatEvent::MissileHit {
            missile,
            monster,
            visible,
            tier,
            ..
        } => {
            let mut text = capitalise(&format!("the {} hits {}.", missile, the(monster, *visible)));
            if let Some(crit) = tier.message() {
                text.push(' ');
                text.push_str(crit);
            }
            text
        }
        CombatEvent::Pierces { missile } => format!("The {} pierces through!", missile),
        CombatEvent::Supershot => "Your shot strikes with tremendous force!".to_string(),
        CombatEvent::Breaks { missile } => format!("The {} breaks.", missile),
        CombatEvent::Lands { missile, .. } => format!("The {} lands nearby.", missile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_hit_with_critical() {
        let event = CombatEvent::Hit {
            monster: "cave orc".into(),
            visible: true,
            tier: CriticalTier::Smite,
            damage: 30,
            verb: None,
        };
        let text = describe_event(&event);
        assert!(text.starts_with("You hit the cave orc."));
        assert!(text.contains("smite"));
    }

    #[test]
    fn test_unseen_target_is_it() {
        let event = CombatEvent::Miss {
            monster: "ghost".into(),
            visible: false,
        };
        assert_eq!(describe_event(&event), "You miss it.");
    }

    #[test]
    fn test_presenter_forwards_text() {
        let mut presenter = Presenter::new(Vec::<String>::new());
        presenter.emit(CombatEvent::Flees {
            monster: "kobold".into(),
        });
        presenter.notice_property(ObjectProperty::ToHit, ItemRef::Weapon);
        assert_eq!(presenter.notices().len(), 1);
        let lines = presenter.into_inner();
        assert_eq!(lines, vec!["The kobold flees in terror!".to_string()]);
    }

    #[test]
    fn test_message_log_records() {
        let mut log = MessageLog::new();
        log.emit(CombatEvent::Stumble);
        log.notice_property(ObjectProperty::ToHit, ItemRef::Weapon);
        assert!(log.noticed(ObjectProperty::ToHit));
        assert_eq!(log.count(|e| matches!(e, CombatEvent::Stumble)), 1);
        assert_eq!(CombatEvent::Stumble.kind(), MessageKind::Generic);
    }
}
