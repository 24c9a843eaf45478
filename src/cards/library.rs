//! The built-in card set.
//!
//! A small classic-era pool covering every ability the engine models:
//! hero powers, battlecries, deathrattles, auras, enchantments, secrets,
//! weapons and triggered minions.

use super::attributes::{AuraScope, AuraSpec, Keyword, StatModifier};
use super::definition::{CardDefinition, CardId};
use crate::effects::{Effect, EffectTarget, TargetSpec};
use crate::triggers::{EventKind, TriggerCondition, TriggerSpec};

// Heroes
pub const MAGE_HERO: CardId = CardId::new(1);
pub const PALADIN_HERO: CardId = CardId::new(2);
pub const PRIEST_HERO: CardId = CardId::new(3);

// Hero powers
pub const FIREBLAST: CardId = CardId::new(10);
pub const REINFORCE: CardId = CardId::new(11);
pub const LESSER_HEAL: CardId = CardId::new(12);

// Minions
pub const WISP: CardId = CardId::new(20);
pub const SILVER_HAND_RECRUIT: CardId = CardId::new(21);
pub const CHILLWIND_YETI: CardId = CardId::new(22);
pub const BOULDERFIST_OGRE: CardId = CardId::new(23);
pub const LOOT_HOARDER: CardId = CardId::new(24);
pub const HARVEST_GOLEM: CardId = CardId::new(25);
pub const DAMAGED_GOLEM: CardId = CardId::new(26);
pub const ABUSIVE_SERGEANT: CardId = CardId::new(27);
pub const RAID_LEADER: CardId = CardId::new(28);
pub const SENJIN_SHIELDMASTA: CardId = CardId::new(29);
pub const BLUEGILL_WARRIOR: CardId = CardId::new(30);
pub const EMBERSCALE_DRAKE: CardId = CardId::new(31);
pub const ELVEN_ARCHER: CardId = CardId::new(32);
pub const NOVICE_ENGINEER: CardId = CardId::new(33);
pub const THRALLMAR_FARSEER: CardId = CardId::new(34);
pub const KNIFE_JUGGLER: CardId = CardId::new(35);
pub const ACOLYTE_OF_PAIN: CardId = CardId::new(36);

// Spells and enchantments
pub const FIREBALL: CardId = CardId::new(50);
pub const MOONFIRE: CardId = CardId::new(51);
pub const ARCANE_EXPLOSION: CardId = CardId::new(52);
pub const HOLY_NOVA: CardId = CardId::new(53);
pub const ARCANE_INTELLECT: CardId = CardId::new(54);
pub const SILENCE: CardId = CardId::new(55);
pub const BLESSING_OF_KINGS: CardId = CardId::new(56);
pub const BLESSING_OF_KINGS_BUFF: CardId = CardId::new(57);
pub const ABUSIVE_BUFF: CardId = CardId::new(58);
pub const THE_COIN: CardId = CardId::new(59);
pub const ASSASSINATE: CardId = CardId::new(60);
pub const EXPLOSIVE_TRAP: CardId = CardId::new(61);

// Weapons
pub const FIERY_WAR_AXE: CardId = CardId::new(70);
pub const LIGHTS_JUSTICE: CardId = CardId::new(71);

/// Every built-in card definition.
#[must_use]
pub fn standard_cards() -> Vec<CardDefinition> {
    let mut cards = heroes();
    cards.extend(minions());
    cards.extend(spells());
    cards.push(CardDefinition::weapon(FIERY_WAR_AXE, "Fiery War Axe", 3, 3, 2));
    cards.push(CardDefinition::weapon(LIGHTS_JUSTICE, "Light's Justice", 1, 1, 4));
    cards
}

fn heroes() -> Vec<CardDefinition> {
    vec![
        CardDefinition::hero(MAGE_HERO, "Jaina Proudmoore", 30, FIREBLAST),
        CardDefinition::hero(PALADIN_HERO, "Uther Lightbringer", 30, REINFORCE),
        CardDefinition::hero(PRIEST_HERO, "Anduin Wrynn", 30, LESSER_HEAL),
        CardDefinition::hero_power(FIREBLAST, "Fireblast", 2, Effect::damage(1, EffectTarget::Chosen))
            .with_target(TargetSpec::character()),
        CardDefinition::hero_power(REINFORCE, "Reinforce", 2, Effect::summon(SILVER_HAND_RECRUIT)),
        CardDefinition::hero_power(LESSER_HEAL, "Lesser Heal", 2, Effect::heal(2, EffectTarget::Chosen))
            .with_target(TargetSpec::character()),
    ]
}

fn minions() -> Vec<CardDefinition> {
    vec![
        CardDefinition::minion(WISP, "Wisp", 0, 1, 1),
        CardDefinition::minion(SILVER_HAND_RECRUIT, "Silver Hand Recruit", 1, 1, 1),
        CardDefinition::minion(CHILLWIND_YETI, "Chillwind Yeti", 4, 4, 5),
        CardDefinition::minion(BOULDERFIST_OGRE, "Boulderfist Ogre", 6, 6, 7),
        CardDefinition::minion(LOOT_HOARDER, "Loot Hoarder", 2, 2, 1).with_deathrattle(Effect::draw(1)),
        CardDefinition::minion(HARVEST_GOLEM, "Harvest Golem", 3, 2, 3)
            .with_deathrattle(Effect::summon(DAMAGED_GOLEM)),
        CardDefinition::minion(DAMAGED_GOLEM, "Damaged Golem", 1, 2, 1),
        CardDefinition::minion(ABUSIVE_SERGEANT, "Abusive Sergeant", 1, 1, 1)
            .with_target(TargetSpec::minion().optional())
            .with_battlecry(Effect::enchant(ABUSIVE_BUFF, EffectTarget::Chosen)),
        CardDefinition::minion(RAID_LEADER, "Raid Leader", 3, 2, 2).with_aura(AuraSpec::new(
            StatModifier::attack(1),
            AuraScope::OtherFriendlyMinions,
        )),
        CardDefinition::minion(SENJIN_SHIELDMASTA, "Sen'jin Shieldmasta", 4, 3, 5)
            .with_keyword(Keyword::Taunt),
        CardDefinition::minion(BLUEGILL_WARRIOR, "Bluegill Warrior", 2, 2, 1)
            .with_keyword(Keyword::Charge),
        CardDefinition::minion(EMBERSCALE_DRAKE, "Emberscale Drake", 3, 2, 4).with_trigger(
            TriggerSpec::new(
                "Emberscale Drake",
                &[EventKind::EndOfTurn],
                Effect::damage(1, EffectTarget::AllEnemies),
            )
            .with_condition(TriggerCondition::ForController),
        ),
        CardDefinition::minion(ELVEN_ARCHER, "Elven Archer", 1, 1, 1)
            .with_target(TargetSpec::character().optional())
            .with_battlecry(Effect::damage(1, EffectTarget::Chosen)),
        CardDefinition::minion(NOVICE_ENGINEER, "Novice Engineer", 2, 1, 1)
            .with_battlecry(Effect::draw(1)),
        CardDefinition::minion(THRALLMAR_FARSEER, "Thrallmar Farseer", 3, 2, 3)
            .with_keyword(Keyword::Windfury),
        CardDefinition::minion(KNIFE_JUGGLER, "Knife Juggler", 2, 2, 1).with_trigger(
            TriggerSpec::new(
                "Knife Juggler",
                &[EventKind::Summon],
                Effect::damage(1, EffectTarget::RandomEnemy),
            )
            .with_condition(TriggerCondition::FriendlySummon),
        ),
        CardDefinition::minion(ACOLYTE_OF_PAIN, "Acolyte of Pain", 3, 1, 3).with_trigger(
            TriggerSpec::new("Acolyte of Pain", &[EventKind::AnyDamage], Effect::draw(1))
                .with_condition(TriggerCondition::TargetIsSelf),
        ),
    ]
}

fn spells() -> Vec<CardDefinition> {
    vec![
        CardDefinition::spell(FIREBALL, "Fireball", 4)
            .with_target(TargetSpec::character())
            .with_effect(Effect::damage(6, EffectTarget::Chosen)),
        CardDefinition::spell(MOONFIRE, "Moonfire", 0)
            .with_target(TargetSpec::character())
            .with_effect(Effect::damage(1, EffectTarget::Chosen)),
        CardDefinition::spell(ARCANE_EXPLOSION, "Arcane Explosion", 2)
            .with_effect(Effect::damage(1, EffectTarget::AllEnemyMinions)),
        CardDefinition::spell(HOLY_NOVA, "Holy Nova", 5).with_effect(Effect::batch(vec![
            Effect::damage(2, EffectTarget::AllEnemies),
            Effect::heal(2, EffectTarget::AllFriendlyCharacters),
        ])),
        CardDefinition::spell(ARCANE_INTELLECT, "Arcane Intellect", 3).with_effect(Effect::draw(2)),
        CardDefinition::spell(SILENCE, "Silence", 0)
            .with_target(TargetSpec::minion())
            .with_effect(Effect::silence(EffectTarget::Chosen)),
        CardDefinition::spell(BLESSING_OF_KINGS, "Blessing of Kings", 4)
            .with_target(TargetSpec::minion())
            .with_effect(Effect::enchant(BLESSING_OF_KINGS_BUFF, EffectTarget::Chosen)),
        CardDefinition::enchantment(
            BLESSING_OF_KINGS_BUFF,
            "Blessing of Kings",
            StatModifier::stats(4, 4),
        ),
        CardDefinition::enchantment(ABUSIVE_BUFF, "Abusive Sergeant", StatModifier::attack(2))
            .with_trigger(TriggerSpec::new(
                "Abusive Sergeant buff expires",
                &[EventKind::EndOfTurn],
                Effect::DetachSelf,
            )),
        CardDefinition::spell(THE_COIN, "The Coin", 0).with_effect(Effect::temporary_mana(1)),
        CardDefinition::spell(ASSASSINATE, "Assassinate", 5)
            .with_target(TargetSpec::enemy_minion())
            .with_effect(Effect::destroy(EffectTarget::Chosen)),
        CardDefinition::spell(EXPLOSIVE_TRAP, "Explosive Trap", 2)
            .as_secret()
            .with_trigger(
                TriggerSpec::new(
                    "Explosive Trap",
                    &[EventKind::Attack],
                    Effect::damage(2, EffectTarget::AllEnemies),
                )
                .with_condition(TriggerCondition::TargetIsFriendlyHero)
                .before()
                .as_secret(),
            ),
    ]
}
