//! Benefit calculation: turns a card's reward tables and a monthly spending
//! profile into an itemized `BenefitResult`.
//!
//! Evaluation is pure and infallible. Out-of-range input (negative spend,
//! wallet shares above 100) produces arithmetically consistent output rather
//! than an error.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::models::{
    BenefitResult, CalcOptions, CalculationPeriod, Category, CategoryBreakdown, CategoryRule,
    CreditCard, PaymentMethod, Platform, PointsProgram, RewardCap, SpendingProfile, Tier,
};

/// Reward after capping, and whether the cap bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capped {
    pub amount: f64,
    pub hit_cap: bool,
}

/// Evaluates every card against the same profile, in catalog order.
pub fn evaluate_all(
    cards: &[CreditCard],
    profile: &SpendingProfile,
    options: &CalcOptions,
) -> Vec<BenefitResult> {
    cards
        .iter()
        .map(|card| evaluate(card, profile, options))
        .collect()
}

/// Evaluates one card against a monthly spending profile.
pub fn evaluate(
    card: &CreditCard,
    profile: &SpendingProfile,
    options: &CalcOptions,
) -> BenefitResult {
    let mut breakdown: Vec<CategoryBreakdown> = Vec::new();
    let mut total_cashback = 0.0;
    let mut total_points = 0.0;

    for category in Category::ALL {
        let spent = profile.amount(category);
        if spent == 0.0 {
            continue;
        }

        let rule = card.cashback.get(&category);

        if let Some(rule) = rule {
            let earned = cash_reward(category, rule, spent, profile);
            let cap = rule.cap();
            let capped = apply_cap(earned, cap, options.period);
            if capped.hit_cap {
                trace!(
                    card = %card.id,
                    category = category.key(),
                    earned,
                    capped = capped.amount,
                    "cash cap reached"
                );
            }
            total_cashback += capped.amount;
            breakdown.push(CategoryBreakdown {
                category,
                spent,
                cashback: capped.amount,
                points: 0.0,
                hit_cap: capped.hit_cap,
                cap_amount: cap.map(|cap| cap.amount),
            });
        }

        if let Some(program) = &card.points {
            let earned = points_earned(category, program, rule, spent, profile);
            let capped = apply_cap(earned, program.cap(), options.period);
            total_points += capped.amount;

            match breakdown.iter_mut().find(|entry| entry.category == category) {
                Some(entry) => entry.points = capped.amount,
                None => breakdown.push(CategoryBreakdown {
                    category,
                    spent,
                    cashback: 0.0,
                    points: capped.amount,
                    hit_cap: false,
                    cap_amount: None,
                }),
            }
        }
    }

    let warnings = check_requirements(card, profile.total_spend());

    let annual_fee = card.effective_annual_fee();
    let points_value = card
        .points
        .as_ref()
        .map(|program| total_points * program.value)
        .unwrap_or(0.0);

    let mut total_benefits = total_cashback + points_value;
    if options.include_welcome_bonus {
        if let Some(value) = card
            .welcome_bonus
            .as_ref()
            .and_then(|bonus| bonus.value)
            .filter(|value| *value != 0.0)
        {
            total_benefits += value;
        }
    }

    let net_annual_benefit = total_benefits - annual_fee;

    debug!(
        card = %card.id,
        total_cashback,
        total_points,
        net_annual_benefit,
        warnings = warnings.len(),
        "evaluated card"
    );

    BenefitResult {
        card_id: card.id.clone(),
        card_name: card.name.clone(),
        bank: card.bank.clone(),
        total_cashback,
        total_points,
        points_value,
        total_benefits,
        net_annual_benefit,
        annual_fee,
        breakdown,
        perks: card.perks.clone(),
        warnings,
    }
}

/// Cash reward for one category before capping: base (flat or tiered), then
/// wallet bonus, then platform bonus for online shopping.
fn cash_reward(
    category: Category,
    rule: &CategoryRule,
    spent: f64,
    profile: &SpendingProfile,
) -> f64 {
    let base = match &rule.tiers {
        Some(tiers) => tiered_reward(spent, tiers),
        None => spent * rule.base_rate,
    };

    let mut reward = base + payment_bonus(spent, profile, rule.mobile_payment_bonus.as_ref());

    if category == Category::OnlineShopping {
        if let Some(rates) = &rule.platform_bonus {
            reward += platform_bonus(profile, rates);
        }
    }

    reward
}

/// Points for one category before capping.
///
/// The wallet bonus reads the *cash* rule's bonus table for the category;
/// points programs carry no bonus table of their own.
fn points_earned(
    category: Category,
    program: &PointsProgram,
    cash_rule: Option<&CategoryRule>,
    spent: f64,
    profile: &SpendingProfile,
) -> f64 {
    let points = spent * program.base_rate * program.multiplier(category);
    let bonus_rates = cash_rule.and_then(|rule| rule.mobile_payment_bonus.as_ref());
    points + payment_bonus(spent, profile, bonus_rates)
}

/// Sums each tier's marginal slice independently. Tiers are not checked for
/// order or overlap. A missing or zero `max_spend` leaves the tier open-ended.
pub fn tiered_reward(spent: f64, tiers: &[Tier]) -> f64 {
    tiers
        .iter()
        .map(|tier| {
            let upper = tier
                .max_spend
                .filter(|max| *max != 0.0)
                .unwrap_or(f64::INFINITY);
            let width = upper - tier.min_spend;
            let slice = (spent - tier.min_spend).max(0.0).min(width);
            if slice > 0.0 { slice * tier.rate } else { 0.0 }
        })
        .sum()
}

/// Extra reward for the share of `spent` routed through each wallet. Shares
/// stack independently and are not clamped to 100%.
pub fn payment_bonus(
    spent: f64,
    profile: &SpendingProfile,
    rates: Option<&BTreeMap<PaymentMethod, f64>>,
) -> f64 {
    let (Some(usage), Some(rates)) = (profile.mobile_payment_usage.as_ref(), rates) else {
        return 0.0;
    };

    PaymentMethod::ALL
        .iter()
        .filter_map(|method| {
            let share = usage.get(method).copied().filter(|share| *share != 0.0)?;
            let rate = rates.get(method).copied().filter(|rate| *rate != 0.0)?;
            Some(spent * share / 100.0 * rate)
        })
        .sum()
}

/// Bonus on the per-platform sub-amounts of online shopping.
pub fn platform_bonus(profile: &SpendingProfile, rates: &BTreeMap<Platform, f64>) -> f64 {
    Platform::ALL
        .iter()
        .filter_map(|platform| {
            let amount = profile
                .online_shopping
                .platform(*platform)
                .filter(|amount| *amount != 0.0)?;
            let rate = rates.get(platform).copied().filter(|rate| *rate != 0.0)?;
            Some(amount * rate)
        })
        .sum()
}

/// Caps `earned` at the cap converted to `period`. No cap means no limit.
pub fn apply_cap(earned: f64, cap: Option<RewardCap>, period: CalculationPeriod) -> Capped {
    match cap {
        Some(cap) => {
            let limit = cap.effective(period);
            Capped {
                amount: earned.min(limit),
                hit_cap: earned > limit,
            }
        }
        None => Capped {
            amount: earned,
            hit_cap: false,
        },
    }
}

/// Advisory checks; never changes the numbers.
///
/// The average is `total / 12` over the profile's monthly figures, shown
/// rounded half up.
fn check_requirements(card: &CreditCard, total_spend: f64) -> Vec<String> {
    let mut warnings = Vec::new();

    if let Some(minimum) = card.requirements.minimum_monthly_spend {
        let monthly = total_spend / 12.0;
        if monthly < minimum {
            warnings.push(format!(
                "Requires {} TWD/month (you spend {:.0} TWD/month)",
                group_thousands(minimum),
                monthly.round()
            ));
        }
    }

    warnings
}

/// `12000` -> `"12,000"`; keeps up to three fraction digits.
fn group_thousands(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let sign = if rounded < 0.0 { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = format!("{:.3}", abs.fract());
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');
    if fraction.len() > 1 {
        format!("{sign}{grouped}{fraction}")
    } else {
        format!("{sign}{grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CapPeriod, Fees, Perks, Requirements, WelcomeBonus};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    /// Helper: a fee-free card with no rules, to be filled in per test.
    fn blank_card() -> CreditCard {
        CreditCard {
            id: "test-card".to_string(),
            name: "Test Card".to_string(),
            bank: "Test Bank".to_string(),
            tier: Default::default(),
            network: Default::default(),
            fees: Fees::default(),
            cashback: Default::default(),
            points: None,
            perks: Perks::default(),
            requirements: Requirements::default(),
            welcome_bonus: None,
            last_updated: "2026-01-13".to_string(),
            source_url: None,
            notes: None,
        }
    }

    fn card_with(category: Category, rule: CategoryRule) -> CreditCard {
        let mut card = blank_card();
        card.cashback.insert(category, rule);
        card
    }

    fn dining_profile(amount: f64) -> SpendingProfile {
        SpendingProfile {
            dining: amount,
            ..SpendingProfile::default()
        }
    }

    fn annual() -> CalcOptions {
        CalcOptions::default()
    }

    fn monthly() -> CalcOptions {
        CalcOptions {
            period: CalculationPeriod::Monthly,
            include_welcome_bonus: false,
        }
    }

    #[test]
    fn test_flat_rate_under_annualized_cap() {
        let card = card_with(
            Category::Dining,
            CategoryRule {
                monthly_cap: Some(300.0),
                ..CategoryRule::flat(0.01)
            },
        );

        let result = evaluate(&card, &dining_profile(10000.0), &annual());

        assert_eq!(result.breakdown.len(), 1);
        let entry = &result.breakdown[0];
        assert_eq!(entry.category, Category::Dining);
        assert_close(entry.cashback, 100.0);
        assert!(!entry.hit_cap);
        // Raw cap is reported, not the annualized one.
        assert_eq!(entry.cap_amount, Some(300.0));
        assert_close(result.total_cashback, 100.0);
    }

    #[test]
    fn test_monthly_period_applies_cap_unconverted() {
        let card = card_with(
            Category::Dining,
            CategoryRule {
                monthly_cap: Some(300.0),
                ..CategoryRule::flat(0.05)
            },
        );

        let result = evaluate(&card, &dining_profile(10000.0), &monthly());
        assert_close(result.total_cashback, 300.0);
        assert!(result.breakdown[0].hit_cap);

        let result = evaluate(&card, &dining_profile(10000.0), &annual());
        assert_close(result.total_cashback, 500.0);
        assert!(!result.breakdown[0].hit_cap);
    }

    #[test]
    fn test_annualized_cap_is_min_of_reward_and_twelve_caps() {
        let card = card_with(
            Category::Dining,
            CategoryRule {
                monthly_cap: Some(10.0),
                ..CategoryRule::flat(0.1)
            },
        );

        // 5000 * 0.1 = 500 against 12 * 10 = 120.
        let result = evaluate(&card, &dining_profile(5000.0), &annual());
        assert_close(result.total_cashback, 120.0);
        assert!(result.breakdown[0].hit_cap);
    }

    #[test]
    fn test_quarterly_and_annual_caps_convert() {
        let quarterly = card_with(
            Category::Gas,
            CategoryRule {
                quarterly_cap: Some(50.0),
                ..CategoryRule::flat(0.1)
            },
        );
        let yearly = card_with(
            Category::Gas,
            CategoryRule {
                annual_cap: Some(150.0),
                ..CategoryRule::flat(0.1)
            },
        );
        let profile = SpendingProfile {
            gas: 3000.0,
            ..SpendingProfile::default()
        };

        let result = evaluate(&quarterly, &profile, &annual());
        assert_close(result.total_cashback, 200.0);
        assert!(result.breakdown[0].hit_cap);

        let result = evaluate(&yearly, &profile, &annual());
        assert_close(result.total_cashback, 150.0);
        assert_eq!(result.breakdown[0].cap_amount, Some(150.0));
    }

    #[test]
    fn test_hit_cap_requires_strict_excess() {
        let cap = Some(RewardCap::new(10.0, CapPeriod::Monthly));

        let capped = apply_cap(120.0, cap, CalculationPeriod::Annual);
        assert_eq!(
            capped,
            Capped {
                amount: 120.0,
                hit_cap: false
            }
        );

        let capped = apply_cap(120.01, cap, CalculationPeriod::Annual);
        assert!(capped.hit_cap);
        assert_close(capped.amount, 120.0);
    }

    #[test]
    fn test_capping_is_idempotent() {
        let cap = Some(RewardCap::new(300.0, CapPeriod::Monthly));
        for earned in [0.0, 150.0, 300.0, 4000.0] {
            let once = apply_cap(earned, cap, CalculationPeriod::Monthly);
            let twice = apply_cap(once.amount, cap, CalculationPeriod::Monthly);
            assert_eq!(once.amount, twice.amount);
            assert!(!twice.hit_cap);
        }
    }

    #[test]
    fn test_zero_cap_means_uncapped() {
        let card = card_with(
            Category::Dining,
            CategoryRule {
                monthly_cap: Some(0.0),
                ..CategoryRule::flat(0.02)
            },
        );
        let result = evaluate(&card, &dining_profile(10000.0), &monthly());
        assert_close(result.total_cashback, 200.0);
        assert!(!result.breakdown[0].hit_cap);
        assert_eq!(result.breakdown[0].cap_amount, None);
    }

    #[test]
    fn test_tiered_marginal_slices() {
        let tiers = vec![
            Tier { min_spend: 0.0, max_spend: Some(5000.0), rate: 0.01 },
            Tier { min_spend: 5000.0, max_spend: Some(10000.0), rate: 0.02 },
            Tier { min_spend: 10000.0, max_spend: None, rate: 0.03 },
        ];

        assert_close(tiered_reward(3000.0, &tiers), 30.0);
        assert_close(tiered_reward(8000.0, &tiers), 50.0 + 60.0);
        assert_close(tiered_reward(12000.0, &tiers), 50.0 + 100.0 + 60.0);
        assert_close(tiered_reward(0.0, &tiers), 0.0);
    }

    #[test]
    fn test_tiers_overlapping_are_summed_as_given() {
        let tiers = vec![
            Tier { min_spend: 0.0, max_spend: None, rate: 0.01 },
            Tier { min_spend: 2000.0, max_spend: Some(4000.0), rate: 0.01 },
        ];
        // 5000 * 0.01 + 2000 * 0.01
        assert_close(tiered_reward(5000.0, &tiers), 70.0);
    }

    #[test]
    fn test_zero_tier_ceiling_is_open_ended() {
        let tiers = vec![
            Tier { min_spend: 0.0, max_spend: Some(5000.0), rate: 0.01 },
            Tier { min_spend: 5000.0, max_spend: Some(0.0), rate: 0.02 },
        ];
        assert_close(tiered_reward(12000.0, &tiers), 50.0 + 140.0);
    }

    #[test]
    fn test_tiers_replace_base_rate() {
        let card = card_with(
            Category::Dining,
            CategoryRule {
                tiers: Some(vec![Tier { min_spend: 1000.0, max_spend: None, rate: 0.05 }]),
                ..CategoryRule::flat(0.5)
            },
        );
        let result = evaluate(&card, &dining_profile(3000.0), &annual());
        assert_close(result.total_cashback, 100.0);
    }

    #[test]
    fn test_mobile_payment_bonus_stacks_per_method() {
        let card = card_with(
            Category::Dining,
            CategoryRule {
                mobile_payment_bonus: Some(BTreeMap::from([
                    (PaymentMethod::LinePay, 0.02),
                    (PaymentMethod::Jkopay, 0.01),
                    (PaymentMethod::EasyWallet, 0.05),
                ])),
                ..CategoryRule::flat(0.01)
            },
        );
        let mut profile = dining_profile(10000.0);
        profile.mobile_payment_usage = Some(BTreeMap::from([
            (PaymentMethod::LinePay, 30.0),
            (PaymentMethod::Jkopay, 10.0),
            (PaymentMethod::PiWallet, 50.0),
        ]));

        let result = evaluate(&card, &profile, &annual());
        // base 100 + linePay 3000*0.02 + jkopay 1000*0.01; piWallet has no rate,
        // easyWallet has no usage.
        assert_close(result.total_cashback, 100.0 + 60.0 + 10.0);
    }

    #[test]
    fn test_mobile_payment_shares_over_100_are_not_clamped() {
        let card = card_with(
            Category::Dining,
            CategoryRule {
                mobile_payment_bonus: Some(BTreeMap::from([
                    (PaymentMethod::LinePay, 0.01),
                    (PaymentMethod::Jkopay, 0.01),
                ])),
                ..CategoryRule::flat(0.0)
            },
        );
        let mut profile = dining_profile(1000.0);
        profile.mobile_payment_usage = Some(BTreeMap::from([
            (PaymentMethod::LinePay, 100.0),
            (PaymentMethod::Jkopay, 100.0),
        ]));

        let result = evaluate(&card, &profile, &annual());
        assert_close(result.total_cashback, 20.0);
    }

    #[test]
    fn test_no_usage_means_no_payment_bonus() {
        let rates = BTreeMap::from([(PaymentMethod::LinePay, 0.5)]);
        let profile = dining_profile(1000.0);
        assert_eq!(payment_bonus(1000.0, &profile, Some(&rates)), 0.0);
        assert_eq!(payment_bonus(1000.0, &SpendingProfile::sample(), None), 0.0);
    }

    #[test]
    fn test_platform_bonus_on_online_shopping() {
        let card = card_with(
            Category::OnlineShopping,
            CategoryRule {
                platform_bonus: Some(BTreeMap::from([
                    (Platform::Shopee, 0.005),
                    (Platform::Momo, 0.005),
                ])),
                ..CategoryRule::flat(0.01)
            },
        );
        let mut profile = SpendingProfile::default();
        profile.online_shopping.total = 8000.0;
        profile.online_shopping.shopee = Some(3000.0);
        profile.online_shopping.momo = Some(3000.0);
        profile.online_shopping.pchome = Some(2000.0);

        let result = evaluate(&card, &profile, &annual());
        assert_close(result.total_cashback, 110.0);
        assert_eq!(result.breakdown[0].category, Category::OnlineShopping);
        assert_close(result.breakdown[0].spent, 8000.0);
    }

    #[test]
    fn test_platform_bonus_ignored_outside_online_shopping() {
        let card = card_with(
            Category::Dining,
            CategoryRule {
                platform_bonus: Some(BTreeMap::from([(Platform::Shopee, 0.5)])),
                ..CategoryRule::flat(0.01)
            },
        );
        let mut profile = dining_profile(1000.0);
        profile.online_shopping.shopee = Some(1000.0);

        let result = evaluate(&card, &profile, &annual());
        assert_close(result.total_cashback, 10.0);
    }

    #[test]
    fn test_bonuses_are_capped_with_base() {
        let card = card_with(
            Category::OnlineShopping,
            CategoryRule {
                monthly_cap: Some(5.0),
                platform_bonus: Some(BTreeMap::from([(Platform::Rakuten, 0.1)])),
                ..CategoryRule::flat(0.01)
            },
        );
        let mut profile = SpendingProfile::default();
        profile.online_shopping.set_platform(Platform::Rakuten, 1000.0);

        let result = evaluate(&card, &profile, &monthly());
        assert_close(result.total_cashback, 5.0);
        assert!(result.breakdown[0].hit_cap);
    }

    #[test]
    fn test_points_with_multiplier_and_value() {
        let mut card = blank_card();
        card.points = Some(PointsProgram {
            base_rate: 0.05,
            value: 0.3,
            category_multipliers: BTreeMap::from([(Category::Dining, 1.5)]),
            ..PointsProgram::default()
        });
        let profile = SpendingProfile {
            dining: 10000.0,
            gas: 2000.0,
            ..SpendingProfile::default()
        };

        let result = evaluate(&card, &profile, &annual());

        assert_close(result.total_points, 750.0 + 100.0);
        assert_close(result.points_value, 850.0 * 0.3);
        assert_close(result.total_cashback, 0.0);
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[0].category, Category::Dining);
        assert_close(result.breakdown[0].cashback, 0.0);
        assert_close(result.breakdown[0].points, 750.0);
        assert!(!result.breakdown[0].hit_cap);
    }

    #[test]
    fn test_points_merge_into_cash_entry() {
        let mut card = card_with(
            Category::Dining,
            CategoryRule {
                monthly_cap: Some(50.0),
                ..CategoryRule::flat(0.01)
            },
        );
        card.points = Some(PointsProgram {
            base_rate: 0.02,
            value: 1.0,
            ..PointsProgram::default()
        });

        let result = evaluate(&card, &dining_profile(10000.0), &monthly());

        assert_eq!(result.breakdown.len(), 1);
        let entry = &result.breakdown[0];
        assert_close(entry.cashback, 50.0);
        assert_close(entry.points, 200.0);
        assert!(entry.hit_cap);
        assert_close(result.total_benefits, 250.0);
    }

    #[test]
    fn test_points_bonus_reuses_cash_rule_wallet_table() {
        let mut card = card_with(
            Category::Dining,
            CategoryRule {
                mobile_payment_bonus: Some(BTreeMap::from([(PaymentMethod::LinePay, 0.1)])),
                ..CategoryRule::flat(0.0)
            },
        );
        card.points = Some(PointsProgram {
            base_rate: 0.01,
            value: 1.0,
            ..PointsProgram::default()
        });
        let mut profile = SpendingProfile {
            dining: 1000.0,
            gas: 1000.0,
            ..SpendingProfile::default()
        };
        profile.mobile_payment_usage = Some(BTreeMap::from([(PaymentMethod::LinePay, 50.0)]));

        let result = evaluate(&card, &profile, &annual());

        // Dining: 10 base points + 500 * 0.1 wallet bonus; same bonus credited as cash.
        let dining = &result.breakdown[0];
        assert_close(dining.points, 60.0);
        assert_close(dining.cashback, 50.0);
        // Gas has no cash rule, so no wallet bonus on points.
        let gas = &result.breakdown[1];
        assert_eq!(gas.category, Category::Gas);
        assert_close(gas.points, 10.0);
    }

    #[test]
    fn test_points_cap_annualized() {
        let mut card = blank_card();
        card.points = Some(PointsProgram {
            base_rate: 1.0,
            value: 0.1,
            monthly_cap: Some(100.0),
            ..PointsProgram::default()
        });

        let result = evaluate(&card, &dining_profile(5000.0), &annual());
        assert_close(result.total_points, 1200.0);
        assert!(!result.breakdown[0].hit_cap);

        let result = evaluate(&card, &dining_profile(5000.0), &monthly());
        assert_close(result.total_points, 100.0);
    }

    #[test]
    fn test_zero_spend_yields_negative_fee() {
        let mut card = card_with(Category::Dining, CategoryRule::flat(0.05));
        card.fees.annual = 1800.0;
        card.points = Some(PointsProgram {
            base_rate: 0.1,
            value: 1.0,
            ..PointsProgram::default()
        });

        let result = evaluate(&card, &SpendingProfile::default(), &annual());

        assert!(result.breakdown.is_empty());
        assert_eq!(result.total_cashback, 0.0);
        assert_eq!(result.total_points, 0.0);
        assert_eq!(result.net_annual_benefit, -1800.0);
    }

    #[test]
    fn test_category_without_rule_is_skipped() {
        let card = card_with(Category::Gas, CategoryRule::flat(0.05));
        let result = evaluate(&card, &dining_profile(10000.0), &annual());
        assert!(result.breakdown.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_welcome_bonus_toggle() {
        let mut card = card_with(Category::Dining, CategoryRule::flat(0.01));
        card.fees.annual = 500.0;
        card.welcome_bonus = Some(WelcomeBonus {
            description: "1,000 cash back".to_string(),
            conditions: "Spend 30,000 in 3 months".to_string(),
            value: Some(1000.0),
        });
        let profile = dining_profile(10000.0);

        let without = evaluate(&card, &profile, &annual());
        let with = evaluate(
            &card,
            &profile,
            &CalcOptions {
                include_welcome_bonus: true,
                ..annual()
            },
        );

        assert_close(with.total_benefits - without.total_benefits, 1000.0);
        assert_close(with.net_annual_benefit - without.net_annual_benefit, 1000.0);
        assert_eq!(with.breakdown, without.breakdown);
    }

    #[test]
    fn test_welcome_bonus_without_value_adds_nothing() {
        let mut card = blank_card();
        card.welcome_bonus = Some(WelcomeBonus {
            description: "Lounge pass".to_string(),
            conditions: "Apply online".to_string(),
            value: None,
        });
        let options = CalcOptions {
            include_welcome_bonus: true,
            ..annual()
        };
        let result = evaluate(&card, &dining_profile(100.0), &options);
        assert_eq!(result.total_benefits, 0.0);
    }

    #[test]
    fn test_first_year_waiver_zeroes_fee() {
        let mut card = card_with(Category::Dining, CategoryRule::flat(0.01));
        card.fees.annual = 3000.0;
        card.fees.first_year_waived = true;

        let result = evaluate(&card, &dining_profile(10000.0), &annual());
        assert_eq!(result.annual_fee, 0.0);
        assert_close(result.net_annual_benefit, 100.0);

        card.fees.first_year_waived = false;
        let result = evaluate(&card, &dining_profile(10000.0), &annual());
        assert_eq!(result.annual_fee, 3000.0);
        assert_close(result.net_annual_benefit, -2900.0);
    }

    #[test]
    fn test_minimum_spend_warning() {
        let mut card = card_with(Category::Dining, CategoryRule::flat(0.01));
        card.requirements.minimum_monthly_spend = Some(10000.0);

        // 64,000 / 12 = 5,333.33
        let result = evaluate(&card, &SpendingProfile::sample(), &annual());
        assert_eq!(
            result.warnings,
            vec!["Requires 10,000 TWD/month (you spend 5333 TWD/month)".to_string()]
        );

        // Warning is advisory: the numbers are unchanged.
        card.requirements.minimum_monthly_spend = None;
        let unwarned = evaluate(&card, &SpendingProfile::sample(), &annual());
        assert!(unwarned.warnings.is_empty());
        assert_eq!(unwarned.total_cashback, result.total_cashback);
    }

    #[test]
    fn test_minimum_spend_warning_rounds_half_up() {
        let mut card = blank_card();
        card.requirements.minimum_monthly_spend = Some(10000.0);

        // 30 / 12 = 2.5 and 6 / 12 = 0.5: halves round up, not to even.
        let result = evaluate(&card, &dining_profile(30.0), &annual());
        assert_eq!(
            result.warnings,
            vec!["Requires 10,000 TWD/month (you spend 3 TWD/month)".to_string()]
        );

        let result = evaluate(&card, &dining_profile(6.0), &annual());
        assert_eq!(
            result.warnings,
            vec!["Requires 10,000 TWD/month (you spend 1 TWD/month)".to_string()]
        );
    }

    #[test]
    fn test_minimum_spend_met_has_no_warning() {
        let mut card = blank_card();
        card.requirements.minimum_monthly_spend = Some(1000.0);
        let result = evaluate(&card, &dining_profile(12000.0), &monthly());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_negative_spend_passes_through() {
        let card = card_with(Category::Dining, CategoryRule::flat(0.01));
        let result = evaluate(&card, &dining_profile(-1000.0), &annual());
        assert_close(result.total_cashback, -10.0);
    }

    #[test]
    fn test_breakdown_follows_category_order() {
        let mut card = blank_card();
        for category in [Category::Other, Category::Dining, Category::Gas] {
            card.cashback.insert(category, CategoryRule::flat(0.01));
        }
        let profile = SpendingProfile {
            dining: 100.0,
            gas: 100.0,
            other: 100.0,
            ..SpendingProfile::default()
        };

        let categories: Vec<Category> = evaluate(&card, &profile, &annual())
            .breakdown
            .iter()
            .map(|entry| entry.category)
            .collect();
        assert_eq!(categories, vec![Category::Dining, Category::Gas, Category::Other]);
    }

    #[test]
    fn test_evaluate_all_keeps_catalog_order() {
        let mut first = card_with(Category::Dining, CategoryRule::flat(0.01));
        first.id = "first".to_string();
        let mut second = card_with(Category::Dining, CategoryRule::flat(0.02));
        second.id = "second".to_string();

        let results = evaluate_all(&[first, second], &dining_profile(1000.0), &annual());
        let ids: Vec<&str> = results.iter().map(|r| r.card_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(10000.0), "10,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(1500.5), "1,500.5");
    }
}
