//! Token Session - the lifecycle state machine behind the badge

use tracing::{debug, trace};

use crate::client::GameClient;
use crate::config::{ConfigChange, InfoConfig};
use crate::display::{Badge, BadgeDisplay, BadgeView};
use crate::region::{is_in_monitored_area, CoarseState, RegionSet};

/// Per-activation session state.
///
/// Owned by the host's event loop, which calls one handler per delivered
/// event, strictly in order. The session holds presence and the stored token
/// count; everything else is read from the [`GameClient`] when needed.
///
/// The stored count is only reset at the login screen and on deactivation.
/// Leaving the monitored area keeps the last count.
///
/// Events delivered outside an activation are ignored.
#[derive(Debug)]
pub struct TokenSession<D: BadgeDisplay> {
    /// Area that counts as "at the Ectofuntus".
    regions: RegionSet,

    /// Host display layer.
    display: D,

    /// Currently selected settings.
    config: InfoConfig,

    /// Badge currently on screen, if set up.
    badge: Option<Badge>,

    /// Between `on_activate` and `on_deactivate`.
    active: bool,

    /// Player is inside the monitored area.
    presence: bool,

    /// Last decoded stored token count.
    stored_tokens: u32,

    /// Ticks decoded since activation.
    tick_count: u64,
}

impl<D: BadgeDisplay> TokenSession<D> {
    /// Create an inactive session watching the Ectofuntus regions.
    pub fn new(display: D) -> Self {
        Self::with_regions(RegionSet::ectofuntus(), display)
    }

    /// Create an inactive session watching a custom region set.
    pub fn with_regions(regions: RegionSet, display: D) -> Self {
        Self {
            regions,
            display,
            config: InfoConfig::default(),
            badge: None,
            active: false,
            presence: false,
            stored_tokens: 0,
            tick_count: 0,
        }
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Add-on started.
    pub fn on_activate(&mut self, client: &impl GameClient, config: InfoConfig) {
        self.active = true;
        self.presence = self.check_region(client);
        self.stored_tokens = 0;
        self.tick_count = 0;
        self.config = config;
        self.setup_badge();
        debug!(
            presence = self.presence,
            counter_type = %self.config.counter_type,
            "session activated"
        );
    }

    /// Add-on stopped.
    pub fn on_deactivate(&mut self) {
        self.active = false;
        self.presence = false;
        self.stored_tokens = 0;
        if let Some(badge) = self.badge.take() {
            self.display.remove_badge(&badge);
        }
        debug!("session deactivated");
    }

    /// Coarse state transition reported by the host.
    ///
    /// Only `Loading` and `LoginScreen` matter. Any other state, including a
    /// dropped connection, leaves presence and the stored count alone.
    pub fn on_coarse_state_change(&mut self, state: CoarseState, client: &impl GameClient) {
        if !self.active {
            return;
        }
        match state {
            CoarseState::Loading => {
                let presence = self.check_region(client);
                if presence != self.presence {
                    debug!(presence, "monitored area presence changed");
                }
                self.presence = presence;
            }
            CoarseState::LoginScreen => {
                self.presence = false;
                self.stored_tokens = 0;
                debug!("login screen, stored tokens reset");
            }
            _ => {}
        }
    }

    /// Game tick. Decodes this tick's counters while inside the area.
    ///
    /// Returns the freshly decoded count, or `None` if the tick was ignored.
    pub fn on_tick(&mut self, client: &impl GameClient) -> Option<u32> {
        if !self.active || !self.presence {
            return None;
        }

        self.tick_count += 1;
        let counters = client.raw_counters();
        self.stored_tokens = counters.decode();
        trace!(
            lower = counters.lower,
            upper = counters.upper,
            stored_tokens = self.stored_tokens,
            "decoded tokens"
        );
        Some(self.stored_tokens)
    }

    /// Config change reported by the host.
    ///
    /// Rebuilds the badge when the counter type setting changed; presence and
    /// the stored count are never touched.
    pub fn on_config_changed(&mut self, change: &ConfigChange, config: InfoConfig) {
        if !self.active || !change.affects_counter_type() {
            return;
        }
        self.config = config;
        self.setup_badge();
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn check_region(&self, client: &impl GameClient) -> bool {
        is_in_monitored_area(&self.regions, client.coarse_state(), || {
            client.map_regions()
        })
    }

    fn setup_badge(&mut self) {
        if let Some(old) = self.badge.take() {
            self.display.remove_badge(&old);
        }
        let badge = Badge::new(self.config.counter_type);
        self.display.add_badge(&badge);
        debug!(item = badge.icon.item, "badge set up");
        self.badge = Some(badge);
    }

    // =========================================================================
    // STATE
    // =========================================================================

    /// Session is between activation and deactivation.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Player is inside the monitored area.
    pub fn in_monitored_area(&self) -> bool {
        self.presence
    }

    /// Last decoded stored token count.
    pub fn stored_tokens(&self) -> u32 {
        self.stored_tokens
    }

    pub fn config(&self) -> &InfoConfig {
        &self.config
    }

    /// Badge currently on screen.
    pub fn badge(&self) -> Option<&Badge> {
        self.badge.as_ref()
    }

    /// What the badge should render right now.
    pub fn badge_view(&self) -> BadgeView {
        BadgeView::new(self.presence, self.stored_tokens, self.config.counter_type)
    }

    pub fn regions(&self) -> &RegionSet {
        &self.regions
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Ticks decoded since activation.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SnapshotClient;
    use crate::config::{CounterType, BONEMEAL_ITEM, CONFIG_GROUP, ECTOTOKEN_ITEM};
    use crate::decoder::RawCounterPair;
    use crate::display::{BadgeRequest, RecordingDisplay, TokenLevel};

    const ECTO: u32 = 14647;
    const ELSEWHERE: u32 = 12850;

    fn client(state: CoarseState, region: u32, lower: u32, upper: u32) -> SnapshotClient {
        SnapshotClient::new(state)
            .with_regions([region])
            .with_counters(RawCounterPair::new(lower, upper))
    }

    fn active_session(c: &impl GameClient) -> TokenSession<RecordingDisplay> {
        let mut session = TokenSession::new(RecordingDisplay::new());
        session.on_activate(c, InfoConfig::default());
        session
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = TokenSession::new(RecordingDisplay::new());
        assert!(!session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 0);
        assert!(session.badge().is_none());
        assert!(session.display().requests().is_empty());
    }

    #[test]
    fn test_activate_inside_area() {
        let c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let session = active_session(&c);

        assert!(session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 0);
        assert_eq!(session.badge().map(|b| b.icon.item), Some(ECTOTOKEN_ITEM));
        assert_eq!(session.display().shown().len(), 1);
    }

    #[test]
    fn test_activate_while_logged_out_ignores_regions() {
        let c = client(CoarseState::LoginScreen, ECTO, 3, 2);
        let session = active_session(&c);
        assert!(!session.in_monitored_area());
    }

    #[test]
    fn test_tick_decodes_only_when_present() {
        let mut c = client(CoarseState::LoggedIn, ELSEWHERE, 3, 2);
        let mut session = active_session(&c);

        assert_eq!(session.on_tick(&c), None);
        assert_eq!(session.on_tick(&c), None);
        assert_eq!(session.stored_tokens(), 0);
        assert_eq!(session.tick_count(), 0);

        // Walk into the Ectofuntus
        c.regions = vec![ECTO];
        c.state = CoarseState::Loading;
        session.on_coarse_state_change(CoarseState::Loading, &c);
        assert!(session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 0);

        c.state = CoarseState::LoggedIn;
        assert_eq!(session.on_tick(&c), Some(515));
        assert_eq!(session.stored_tokens(), 515);
        assert_eq!(session.tick_count(), 1);
    }

    #[test]
    fn test_tick_reads_fresh_counters() {
        let mut c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);

        assert_eq!(session.on_tick(&c), Some(515));
        c.set_counters(RawCounterPair::new(70, 1));
        assert_eq!(session.on_tick(&c), Some(390));
        assert_eq!(session.stored_tokens(), 390);
    }

    #[test]
    fn test_login_screen_resets() {
        let mut c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);
        session.on_tick(&c);
        assert_eq!(session.stored_tokens(), 515);

        c.state = CoarseState::LoginScreen;
        session.on_coarse_state_change(CoarseState::LoginScreen, &c);
        assert!(!session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 0);

        for _ in 0..5 {
            assert_eq!(session.on_tick(&c), None);
        }
        assert_eq!(session.stored_tokens(), 0);
    }

    #[test]
    fn test_leaving_area_keeps_last_count() {
        let mut c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);
        session.on_tick(&c);

        c.regions = vec![ELSEWHERE];
        c.state = CoarseState::Loading;
        session.on_coarse_state_change(CoarseState::Loading, &c);

        assert!(!session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 515);
        assert!(!session.badge_view().visible);
    }

    #[test]
    fn test_other_states_leave_state_untouched() {
        let mut c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);
        session.on_tick(&c);

        for state in [
            CoarseState::ConnectionLost,
            CoarseState::Hopping,
            CoarseState::LoggingIn,
            CoarseState::LoggedIn,
            CoarseState::Starting,
        ] {
            c.state = state;
            session.on_coarse_state_change(state, &c);
            assert!(session.in_monitored_area());
            assert_eq!(session.stored_tokens(), 515);
        }
    }

    #[test]
    fn test_deactivate_tears_down() {
        let c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);
        session.on_tick(&c);

        session.on_deactivate();
        assert!(!session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 0);
        assert!(session.badge().is_none());
        assert!(session.display().shown().is_empty());

        // Second deactivate has nothing left to remove
        let before = session.display().requests().len();
        session.on_deactivate();
        assert_eq!(session.display().requests().len(), before);
    }

    #[test]
    fn test_events_before_activation_ignored() {
        let c = client(CoarseState::Loading, ECTO, 3, 2);
        let mut session = TokenSession::new(RecordingDisplay::new());

        session.on_coarse_state_change(CoarseState::Loading, &c);
        assert!(!session.in_monitored_area());
        assert_eq!(session.on_tick(&c), None);
        session.on_config_changed(
            &ConfigChange::counter_type(),
            InfoConfig::new(CounterType::Bonemeal),
        );

        assert!(!session.is_active());
        assert_eq!(session.stored_tokens(), 0);
        assert!(!session.badge_view().visible);
        assert!(session.badge().is_none());
        assert!(session.display().requests().is_empty());
    }

    #[test]
    fn test_events_after_deactivation_ignored() {
        let mut c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);
        session.on_tick(&c);
        session.on_deactivate();
        session.display_mut().clear_requests();

        c.state = CoarseState::Loading;
        session.on_coarse_state_change(CoarseState::Loading, &c);
        c.state = CoarseState::LoggedIn;
        assert_eq!(session.on_tick(&c), None);
        session.on_config_changed(&ConfigChange::counter_type(), InfoConfig::default());

        assert!(!session.is_active());
        assert!(!session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 0);
        assert!(!session.badge_view().visible);
        assert!(session.badge().is_none());
        assert!(session.display().requests().is_empty());

        // Reactivating resumes normal handling
        session.on_activate(&c, InfoConfig::default());
        assert!(session.is_active());
        assert_eq!(session.on_tick(&c), Some(515));
    }

    #[test]
    fn test_tick_count_only_counts_decoded_ticks() {
        let mut c = client(CoarseState::LoggedIn, ELSEWHERE, 3, 2);
        let mut session = active_session(&c);
        session.on_tick(&c);
        assert_eq!(session.tick_count(), 0);

        c.regions = vec![ECTO];
        c.state = CoarseState::Loading;
        session.on_coarse_state_change(CoarseState::Loading, &c);
        session.on_tick(&c);
        session.on_tick(&c);
        assert_eq!(session.tick_count(), 2);
    }

    #[test]
    fn test_counter_type_change_rebuilds_badge() {
        let c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);
        session.on_tick(&c);
        session.display_mut().clear_requests();

        session.on_config_changed(
            &ConfigChange::counter_type(),
            InfoConfig::new(CounterType::Bonemeal),
        );

        let old = Badge::new(CounterType::EctoToken);
        let new = Badge::new(CounterType::Bonemeal);
        assert_eq!(
            session.display().requests(),
            &[BadgeRequest::Remove(old), BadgeRequest::Add(new)]
        );
        assert_eq!(session.display().shown(), &[new]);
        assert_eq!(session.badge().map(|b| b.icon.item), Some(BONEMEAL_ITEM));
        assert!(session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 515);
    }

    #[test]
    fn test_unchanged_config_resetup_is_idempotent() {
        let c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);
        session.on_tick(&c);

        session.on_config_changed(&ConfigChange::counter_type(), InfoConfig::default());
        session.on_config_changed(&ConfigChange::counter_type(), InfoConfig::default());

        assert!(session.in_monitored_area());
        assert_eq!(session.stored_tokens(), 515);
        assert_eq!(session.display().shown(), &[Badge::new(CounterType::EctoToken)]);
    }

    #[test]
    fn test_unrelated_config_change_ignored() {
        let c = client(CoarseState::LoggedIn, ECTO, 3, 2);
        let mut session = active_session(&c);
        session.display_mut().clear_requests();

        session.on_config_changed(
            &ConfigChange::new(CONFIG_GROUP, "somethingElse"),
            InfoConfig::new(CounterType::Bonemeal),
        );

        assert!(session.display().requests().is_empty());
        assert_eq!(session.config().counter_type, CounterType::EctoToken);
    }

    #[test]
    fn test_badge_view_follows_state() {
        let c = client(CoarseState::LoggedIn, ECTO, 40, 3);
        let mut session = active_session(&c);
        session.on_tick(&c);

        let view = session.badge_view();
        assert!(view.visible);
        assert_eq!(view.count, 1000);
        assert_eq!(view.level, TokenLevel::Full);

        session.on_config_changed(
            &ConfigChange::counter_type(),
            InfoConfig::new(CounterType::Bonemeal),
        );
        assert_eq!(session.badge_view().count, 0);
    }

    #[test]
    fn test_custom_region_set() {
        let c = client(CoarseState::LoggedIn, 42, 0, 0);
        let mut session =
            TokenSession::with_regions(RegionSet::new([42]), RecordingDisplay::new());
        session.on_activate(&c, InfoConfig::default());
        assert!(session.in_monitored_area());
        assert_eq!(session.regions().ids(), &[42]);
    }
}
