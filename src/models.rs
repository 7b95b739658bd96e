use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Spending buckets a card can reward. Declaration order is the order the
/// engine walks a profile in, so breakdowns come out in this order too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Dining,
    ConvenienceStore,
    /// Composite bucket: a total plus per-platform sub-amounts.
    OnlineShopping,
    DepartmentStore,
    Hypermarket,
    Drugstore,
    Gas,
    Parking,
    PublicTransport,
    Electricity,
    Water,
    GasUtility,
    Internet,
    MobilePhone,
    DomesticTravel,
    InternationalTravel,
    Entertainment,
    Streaming,
    Other,
}

impl Category {
    pub const ALL: [Category; 19] = [
        Category::Dining,
        Category::ConvenienceStore,
        Category::OnlineShopping,
        Category::DepartmentStore,
        Category::Hypermarket,
        Category::Drugstore,
        Category::Gas,
        Category::Parking,
        Category::PublicTransport,
        Category::Electricity,
        Category::Water,
        Category::GasUtility,
        Category::Internet,
        Category::MobilePhone,
        Category::DomesticTravel,
        Category::InternationalTravel,
        Category::Entertainment,
        Category::Streaming,
        Category::Other,
    ];

    /// Key used in catalog files and request bodies (e.g. `gasUtility`).
    pub fn key(&self) -> &'static str {
        match self {
            Category::Dining => "dining",
            Category::ConvenienceStore => "convenienceStore",
            Category::OnlineShopping => "onlineShopping",
            Category::DepartmentStore => "departmentStore",
            Category::Hypermarket => "hypermarket",
            Category::Drugstore => "drugstore",
            Category::Gas => "gas",
            Category::Parking => "parking",
            Category::PublicTransport => "publicTransport",
            Category::Electricity => "electricity",
            Category::Water => "water",
            Category::GasUtility => "gasUtility",
            Category::Internet => "internet",
            Category::MobilePhone => "mobilePhone",
            Category::DomesticTravel => "domesticTravel",
            Category::InternationalTravel => "internationalTravel",
            Category::Entertainment => "entertainment",
            Category::Streaming => "streaming",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Dining => "Dining",
            Category::ConvenienceStore => "Convenience Stores",
            Category::OnlineShopping => "Online Shopping",
            Category::DepartmentStore => "Department Stores",
            Category::Hypermarket => "Hypermarkets",
            Category::Drugstore => "Drugstores",
            Category::Gas => "Gas",
            Category::Parking => "Parking",
            Category::PublicTransport => "Public Transport",
            Category::Electricity => "Electricity",
            Category::Water => "Water",
            Category::GasUtility => "Gas Utility",
            Category::Internet => "Internet",
            Category::MobilePhone => "Mobile Phone",
            Category::DomesticTravel => "Domestic Travel",
            Category::InternationalTravel => "International Travel",
            Category::Entertainment => "Entertainment",
            Category::Streaming => "Streaming",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mobile wallets that some cards pay an extra rate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PaymentMethod {
    LinePay,
    Jkopay,
    PiWallet,
    EasyWallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::LinePay,
        PaymentMethod::Jkopay,
        PaymentMethod::PiWallet,
        PaymentMethod::EasyWallet,
    ];
}

/// Online marketplaces a card can carry a platform bonus for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Shopee,
    Momo,
    Pchome,
    Rakuten,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Shopee,
        Platform::Momo,
        Platform::Pchome,
        Platform::Rakuten,
    ];
}

/// Online shopping spend split by platform. `total` is trusted as given;
/// the platform amounts are read separately for platform bonuses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnlineShoppingBreakdown {
    pub total: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub momo: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pchome: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rakuten: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<f64>,
}

impl OnlineShoppingBreakdown {
    pub fn platform(&self, platform: Platform) -> Option<f64> {
        match platform {
            Platform::Shopee => self.shopee,
            Platform::Momo => self.momo,
            Platform::Pchome => self.pchome,
            Platform::Rakuten => self.rakuten,
        }
    }

    /// Sets one platform's amount and recomputes `total` from the
    /// sub-amounts, the same way the input form keeps them consistent.
    pub fn set_platform(&mut self, platform: Platform, amount: f64) {
        let slot = match platform {
            Platform::Shopee => &mut self.shopee,
            Platform::Momo => &mut self.momo,
            Platform::Pchome => &mut self.pchome,
            Platform::Rakuten => &mut self.rakuten,
        };
        *slot = Some(amount);
        self.recompute_total();
    }

    pub fn set_other(&mut self, amount: f64) {
        self.other = Some(amount);
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total = [self.shopee, self.momo, self.pchome, self.rakuten, self.other]
            .iter()
            .map(|amount| amount.unwrap_or(0.0))
            .sum();
    }
}

/// Percentage (0-100) of spend routed through each wallet. Shares are not
/// required to sum to 100.
pub type MobilePaymentUsage = BTreeMap<PaymentMethod, f64>;

/// A user's monthly spend per category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpendingProfile {
    pub dining: f64,
    pub convenience_store: f64,
    pub online_shopping: OnlineShoppingBreakdown,
    pub department_store: f64,
    pub hypermarket: f64,
    pub drugstore: f64,
    pub gas: f64,
    pub parking: f64,
    pub public_transport: f64,
    pub electricity: f64,
    pub water: f64,
    pub gas_utility: f64,
    pub internet: f64,
    pub mobile_phone: f64,
    pub domestic_travel: f64,
    pub international_travel: f64,
    pub entertainment: f64,
    pub streaming: f64,
    pub other: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_payment_usage: Option<MobilePaymentUsage>,
}

impl SpendingProfile {
    /// Monthly amount for a category; online shopping reports its `total`.
    pub fn amount(&self, category: Category) -> f64 {
        match category {
            Category::Dining => self.dining,
            Category::ConvenienceStore => self.convenience_store,
            Category::OnlineShopping => self.online_shopping.total,
            Category::DepartmentStore => self.department_store,
            Category::Hypermarket => self.hypermarket,
            Category::Drugstore => self.drugstore,
            Category::Gas => self.gas,
            Category::Parking => self.parking,
            Category::PublicTransport => self.public_transport,
            Category::Electricity => self.electricity,
            Category::Water => self.water,
            Category::GasUtility => self.gas_utility,
            Category::Internet => self.internet,
            Category::MobilePhone => self.mobile_phone,
            Category::DomesticTravel => self.domestic_travel,
            Category::InternationalTravel => self.international_travel,
            Category::Entertainment => self.entertainment,
            Category::Streaming => self.streaming,
            Category::Other => self.other,
        }
    }

    pub fn set_amount(&mut self, category: Category, amount: f64) {
        let slot = match category {
            Category::Dining => &mut self.dining,
            Category::ConvenienceStore => &mut self.convenience_store,
            Category::OnlineShopping => &mut self.online_shopping.total,
            Category::DepartmentStore => &mut self.department_store,
            Category::Hypermarket => &mut self.hypermarket,
            Category::Drugstore => &mut self.drugstore,
            Category::Gas => &mut self.gas,
            Category::Parking => &mut self.parking,
            Category::PublicTransport => &mut self.public_transport,
            Category::Electricity => &mut self.electricity,
            Category::Water => &mut self.water,
            Category::GasUtility => &mut self.gas_utility,
            Category::Internet => &mut self.internet,
            Category::MobilePhone => &mut self.mobile_phone,
            Category::DomesticTravel => &mut self.domestic_travel,
            Category::InternationalTravel => &mut self.international_travel,
            Category::Entertainment => &mut self.entertainment,
            Category::Streaming => &mut self.streaming,
            Category::Other => &mut self.other,
        };
        *slot = amount;
    }

    /// Sum of every category's monthly amount.
    pub fn total_spend(&self) -> f64 {
        Category::ALL.iter().map(|category| self.amount(*category)).sum()
    }

    /// The starting profile of the comparison form.
    pub fn sample() -> Self {
        Self {
            dining: 10000.0,
            convenience_store: 2000.0,
            online_shopping: OnlineShoppingBreakdown {
                total: 8000.0,
                shopee: Some(3000.0),
                momo: Some(3000.0),
                pchome: Some(2000.0),
                rakuten: None,
                other: None,
            },
            department_store: 5000.0,
            hypermarket: 8000.0,
            drugstore: 1000.0,
            gas: 3000.0,
            parking: 500.0,
            public_transport: 1000.0,
            electricity: 1500.0,
            water: 500.0,
            gas_utility: 800.0,
            internet: 1000.0,
            mobile_phone: 1200.0,
            domestic_travel: 5000.0,
            international_travel: 10000.0,
            entertainment: 3000.0,
            streaming: 500.0,
            other: 2000.0,
            mobile_payment_usage: Some(BTreeMap::from([
                (PaymentMethod::LinePay, 30.0),
                (PaymentMethod::Jkopay, 10.0),
                (PaymentMethod::PiWallet, 5.0),
                (PaymentMethod::EasyWallet, 5.0),
            ])),
        }
    }
}

/// One marginal slice of a tiered schedule. `max_spend: None` is unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub min_spend: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_spend: Option<f64>,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapPeriod {
    Monthly,
    Quarterly,
    Annual,
}

/// The window a comparison is computed over. Only affects cap conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationPeriod {
    Monthly,
    #[default]
    Annual,
}

impl CapPeriod {
    /// How many of this cap's periods fit in the calculation period.
    pub fn multiplier(&self, period: CalculationPeriod) -> f64 {
        match (period, self) {
            (CalculationPeriod::Monthly, _) => 1.0,
            (CalculationPeriod::Annual, CapPeriod::Monthly) => 12.0,
            (CalculationPeriod::Annual, CapPeriod::Quarterly) => 4.0,
            (CalculationPeriod::Annual, CapPeriod::Annual) => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardCap {
    pub amount: f64,
    pub period: CapPeriod,
}

impl RewardCap {
    pub fn new(amount: f64, period: CapPeriod) -> Self {
        Self { amount, period }
    }

    /// Cap converted to the calculation period.
    pub fn effective(&self, period: CalculationPeriod) -> f64 {
        self.amount * self.period.multiplier(period)
    }
}

/// Cash-back rule for a single category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    pub base_rate: f64,
    /// When present, replaces `base_rate` entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiers: Option<Vec<Tier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarterly_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_cap: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_payment_bonus: Option<BTreeMap<PaymentMethod, f64>>,
    /// Only read for the online shopping category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_bonus: Option<BTreeMap<Platform, f64>>,
}

impl CategoryRule {
    pub fn flat(base_rate: f64) -> Self {
        Self {
            base_rate,
            ..Self::default()
        }
    }

    /// First configured cap, checked monthly then quarterly then annual.
    /// A zero cap counts as no cap.
    pub fn cap(&self) -> Option<RewardCap> {
        [
            (self.monthly_cap, CapPeriod::Monthly),
            (self.quarterly_cap, CapPeriod::Quarterly),
            (self.annual_cap, CapPeriod::Annual),
        ]
        .into_iter()
        .find_map(|(amount, period)| {
            amount
                .filter(|amount| *amount != 0.0)
                .map(|amount| RewardCap::new(amount, period))
        })
    }
}

/// Per-category cash rules. Categories without an entry earn no cash back.
pub type RewardTable = BTreeMap<Category, CategoryRule>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPartner {
    pub name: String,
    pub ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_transfer: Option<f64>,
}

/// Points accrual rules. Redemption metadata is carried for display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsProgram {
    pub base_rate: f64,
    /// Currency value of a single point.
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_redemption: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfer_partners: Vec<TransferPartner>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub category_multipliers: BTreeMap<Category, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_cap: Option<f64>,
}

impl PointsProgram {
    pub fn multiplier(&self, category: Category) -> f64 {
        self.category_multipliers
            .get(&category)
            .copied()
            .filter(|multiplier| *multiplier != 0.0)
            .unwrap_or(1.0)
    }

    pub fn cap(&self) -> Option<RewardCap> {
        self.monthly_cap
            .filter(|amount| *amount != 0.0)
            .map(|amount| RewardCap::new(amount, CapPeriod::Monthly))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    pub annual: f64,
    #[serde(default)]
    pub first_year_waived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiver_condition: Option<String>,
    #[serde(default)]
    pub foreign_transaction: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardTier {
    #[default]
    General,
    Gold,
    Platinum,
    Infinite,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Visa,
    Mastercard,
    Jcb,
    Unionpay,
}

impl fmt::Display for CardTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardTier::General => "general",
            CardTier::Gold => "gold",
            CardTier::Platinum => "platinum",
            CardTier::Infinite => "infinite",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Visa => "visa",
            Network::Mastercard => "mastercard",
            Network::Jcb => "jcb",
            Network::Unionpay => "unionpay",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationMethod {
    Online,
    Branch,
    Both,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_monthly_spend: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_method: Option<ApplicationMethod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeBonus {
    pub description: String,
    pub conditions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportLounge {
    pub provider: String,
    pub visits_per_year: u32,
    pub guest_allowed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domestic_airports: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelInsurance {
    pub overseas: f64,
    pub domestic: f64,
    #[serde(rename = "rentalCarCDW")]
    pub rental_car_cdw: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseProtection {
    pub coverage_amount: f64,
    pub days_of_coverage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedWarranty {
    pub additional_months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneInsurance {
    pub coverage_amount: f64,
    pub deductible: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantDiscount {
    pub merchant: String,
    pub description: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZeroInstallment {
    pub available_months: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merchants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_amount: Option<f64>,
}

/// Non-monetary card features, copied through to results untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airport_lounge: Option<AirportLounge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_insurance: Option<TravelInsurance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_protection: Option<PurchaseProtection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_warranty: Option<ExtendedWarranty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone_insurance: Option<PhoneInsurance>,
    #[serde(default)]
    pub concierge_service: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub free_delivery: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub discounts: Vec<MerchantDiscount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zero_installment: Option<ZeroInstallment>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub id: String,
    pub name: String,
    pub bank: String,
    #[serde(default)]
    pub tier: CardTier,
    #[serde(default)]
    pub network: Network,
    pub fees: Fees,
    #[serde(default)]
    pub cashback: RewardTable,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<PointsProgram>,
    #[serde(default)]
    pub perks: Perks,
    #[serde(default)]
    pub requirements: Requirements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_bonus: Option<WelcomeBonus>,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreditCard {
    /// Fee charged in the comparison; a first-year waiver zeroes it outright.
    pub fn effective_annual_fee(&self) -> f64 {
        if self.fees.first_year_waived {
            0.0
        } else {
            self.fees.annual
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalcOptions {
    #[serde(rename = "calculationPeriod", alias = "period")]
    pub period: CalculationPeriod,
    pub include_welcome_bonus: bool,
}

/// One line of a result's itemization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    pub category: Category,
    #[tabled(display_with = "display_amount")]
    pub spent: f64,
    #[tabled(display_with = "display_amount")]
    pub cashback: f64,
    #[tabled(display_with = "display_amount")]
    pub points: f64,
    pub hit_cap: bool,
    /// Raw cap from the rule, before period conversion.
    #[tabled(display_with = "display_cap")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap_amount: Option<f64>,
}

fn display_amount(value: &f64) -> String {
    format!("{value:.2}")
}

fn display_cap(value: &Option<f64>) -> String {
    value.map(|cap| format!("{cap:.0}")).unwrap_or_else(|| "-".to_string())
}

/// Full evaluation of one card against one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitResult {
    pub card_id: String,
    pub card_name: String,
    pub bank: String,
    pub total_cashback: f64,
    pub total_points: f64,
    pub points_value: f64,
    pub total_benefits: f64,
    pub net_annual_benefit: f64,
    pub annual_fee: f64,
    pub breakdown: Vec<CategoryBreakdown>,
    pub perks: Perks,
    pub warnings: Vec<String>,
}

/// Catalog listing row for the `list-cards` table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    pub bank: String,
    pub tier: CardTier,
    pub network: Network,
    #[tabled(display_with = "display_amount")]
    pub annual_fee: f64,
    pub first_year_waived: bool,
}

impl From<&CreditCard> for CardSummary {
    fn from(card: &CreditCard) -> Self {
        Self {
            id: card.id.clone(),
            name: card.name.clone(),
            bank: card.bank.clone(),
            tier: card.tier,
            network: card.network,
            annual_fee: card.fees.annual,
            first_year_waived: card.fees.first_year_waived,
        }
    }
}

/// Used for the comparison table
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct ResultSummary {
    pub card_id: String,
    pub card_name: String,
    #[tabled(display_with = "display_amount")]
    pub cashback: f64,
    #[tabled(display_with = "display_amount")]
    pub points: f64,
    #[tabled(display_with = "display_amount")]
    pub points_value: f64,
    #[tabled(display_with = "display_amount")]
    pub total_benefits: f64,
    #[tabled(display_with = "display_amount")]
    pub annual_fee: f64,
    #[tabled(display_with = "display_amount")]
    pub net_benefit: f64,
}

impl From<&BenefitResult> for ResultSummary {
    fn from(result: &BenefitResult) -> Self {
        Self {
            card_id: result.card_id.clone(),
            card_name: result.card_name.clone(),
            cashback: result.total_cashback,
            points: result.total_points,
            points_value: result.points_value,
            total_benefits: result.total_benefits,
            annual_fee: result.annual_fee,
            net_benefit: result.net_annual_benefit,
        }
    }
}
