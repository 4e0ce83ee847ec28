// crates/sigil-gather/src/sources.rs
//
// In-memory source implementations backed by pre-gathered data. Used to
// score fixture snapshots (the CLI path) and as test collaborators.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;

use sigil_core::{
    ActivitySignal, ActivitySource, Claim, EnsData, EnsMetadataSource, GraphSource, Profile,
    ProfileSource, ReverseEnsSource, RewardsSource, SigilError, WalletActivity,
    WalletActivitySource, WalletAgeSource,
};

fn norm(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Profiles keyed by wallet address or ENS name.
#[derive(Default)]
pub struct StaticProfiles {
    profiles: HashMap<String, Profile>,
}

impl StaticProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, profile: Profile) {
        self.profiles.insert(norm(&profile.wallet), profile);
    }
}

#[async_trait]
impl ProfileSource for StaticProfiles {
    async fn profile(&self, wallet_or_ens: &str) -> Profile {
        self.profiles
            .get(&norm(wallet_or_ens))
            .cloned()
            .unwrap_or_else(|| Profile::empty(wallet_or_ens))
    }
}

/// Wallet age and activity for known addresses.
#[derive(Default)]
pub struct StaticWalletStats {
    ages: HashMap<String, f64>,
    activity: HashMap<String, WalletActivity>,
}

impl StaticWalletStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: &str, age_days: Option<f64>, activity: WalletActivity) {
        if let Some(age) = age_days {
            self.ages.insert(norm(address), age);
        }
        self.activity.insert(norm(address), activity);
    }
}

#[async_trait]
impl WalletAgeSource for StaticWalletStats {
    async fn age_days(&self, address: &str) -> Option<f64> {
        self.ages.get(&norm(address)).copied()
    }
}

#[async_trait]
impl WalletActivitySource for StaticWalletStats {
    async fn activity(&self, address: &str) -> WalletActivity {
        self.activity
            .get(&norm(address))
            .cloned()
            .unwrap_or_default()
    }
}

/// Reward balances and claims for known subjects.
#[derive(Default)]
pub struct StaticRewards {
    balances: HashMap<String, f64>,
    claims: HashMap<String, Vec<Claim>>,
}

impl StaticRewards {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: &str, balance: Option<f64>, claims: Vec<Claim>) {
        if let Some(b) = balance {
            self.balances.insert(norm(subject), b);
        }
        self.claims.insert(norm(subject), claims);
    }
}

#[async_trait]
impl RewardsSource for StaticRewards {
    async fn balance(&self, wallet_or_ens: &str) -> Option<f64> {
        self.balances.get(&norm(wallet_or_ens)).copied()
    }

    async fn claims(&self, wallet_or_ens: &str) -> Vec<Claim> {
        self.claims
            .get(&norm(wallet_or_ens))
            .cloned()
            .unwrap_or_default()
    }
}

/// ENS data: reverse address-to-name map plus per-name metadata.
#[derive(Default)]
pub struct StaticEns {
    reverse: HashMap<String, String>,
    metadata: HashMap<String, EnsData>,
}

impl StaticEns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_reverse(&mut self, address: &str, name: &str) {
        self.reverse.insert(norm(address), norm(name));
    }

    pub fn insert_metadata(&mut self, data: EnsData) {
        self.metadata.insert(norm(&data.name), data);
    }
}

#[async_trait]
impl ReverseEnsSource for StaticEns {
    async fn lookup_address(
        &self,
        _endpoint: Option<&str>,
        address: &str,
    ) -> Result<Option<String>, SigilError> {
        Ok(self.reverse.get(&norm(address)).cloned())
    }
}

#[async_trait]
impl EnsMetadataSource for StaticEns {
    async fn metadata(&self, ens_name: &str) -> Option<EnsData> {
        self.metadata.get(&norm(ens_name)).cloned()
    }
}

/// Graph sets for known subjects; unknown subjects yield empty sets.
#[derive(Default)]
pub struct StaticGraphs {
    creators: HashMap<String, BTreeSet<String>>,
    social: HashMap<String, BTreeSet<String>>,
    collections: HashMap<String, BTreeSet<String>>,
    contracts: HashMap<String, BTreeSet<String>>,
    farcaster: HashMap<String, BTreeSet<String>>,
}

impl StaticGraphs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        subject: &str,
        creators: BTreeSet<String>,
        social: BTreeSet<String>,
        collections: BTreeSet<String>,
        contracts: BTreeSet<String>,
        farcaster: BTreeSet<String>,
    ) {
        let key = norm(subject);
        self.creators.insert(key.clone(), creators);
        self.social.insert(key.clone(), social);
        self.collections.insert(key.clone(), collections);
        self.contracts.insert(key.clone(), contracts);
        self.farcaster.insert(key, farcaster);
    }

    fn get(map: &HashMap<String, BTreeSet<String>>, key: &str) -> BTreeSet<String> {
        map.get(&norm(key)).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl GraphSource for StaticGraphs {
    async fn creator_set(&self, wallet_or_ens: &str) -> BTreeSet<String> {
        Self::get(&self.creators, wallet_or_ens)
    }

    async fn social_graph(&self, wallet_or_ens: &str) -> BTreeSet<String> {
        Self::get(&self.social, wallet_or_ens)
    }

    async fn collection_set(&self, wallet_or_ens: &str) -> BTreeSet<String> {
        Self::get(&self.collections, wallet_or_ens)
    }

    async fn contract_set(&self, wallet_or_ens: &str) -> BTreeSet<String> {
        Self::get(&self.contracts, wallet_or_ens)
    }

    async fn farcaster_wallets(&self, wallet_or_ens: &str) -> BTreeSet<String> {
        Self::get(&self.farcaster, wallet_or_ens)
    }
}

/// Activity signals for known subjects.
#[derive(Default)]
pub struct StaticActivity {
    signals: HashMap<String, Vec<ActivitySignal>>,
}

impl StaticActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: &str, signals: Vec<ActivitySignal>) {
        self.signals.insert(norm(subject), signals);
    }
}

#[async_trait]
impl ActivitySource for StaticActivity {
    async fn activity_signals(&self, wallet_or_ens: &str) -> Vec<ActivitySignal> {
        self.signals
            .get(&norm(wallet_or_ens))
            .cloned()
            .unwrap_or_default()
    }
}

/// A single bundle implementing every collaborator trait over static data,
/// convenient for snapshot scoring and tests.
#[derive(Default)]
pub struct StaticBundle {
    pub profiles: StaticProfiles,
    pub wallet_stats: StaticWalletStats,
    pub rewards: StaticRewards,
    pub ens: StaticEns,
    pub graphs: StaticGraphs,
    pub activity: StaticActivity,
}

impl StaticBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split the bundle into shared trait objects.
    pub fn into_arcs(self) -> StaticArcs {
        let ens = Arc::new(self.ens);
        StaticArcs {
            profiles: Arc::new(self.profiles),
            wallet_stats: Arc::new(self.wallet_stats),
            rewards: Arc::new(self.rewards),
            reverse_ens: ens.clone(),
            ens_metadata: ens,
            graphs: Arc::new(self.graphs),
            activity: Arc::new(self.activity),
        }
    }
}

/// Arc'd trait objects produced from a [`StaticBundle`].
pub struct StaticArcs {
    pub profiles: Arc<StaticProfiles>,
    pub wallet_stats: Arc<StaticWalletStats>,
    pub rewards: Arc<StaticRewards>,
    pub reverse_ens: Arc<StaticEns>,
    pub ens_metadata: Arc<StaticEns>,
    pub graphs: Arc<StaticGraphs>,
    pub activity: Arc<StaticActivity>,
}
