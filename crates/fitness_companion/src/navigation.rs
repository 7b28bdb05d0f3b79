//! Onboarding pager and home tab selection.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HomeTab {
    #[default]
    News,
    Community,
    Activity,
    Progress,
    Profile,
}

impl HomeTab {
    pub const ALL: [HomeTab; 5] = [
        HomeTab::News,
        HomeTab::Community,
        HomeTab::Activity,
        HomeTab::Progress,
        HomeTab::Profile,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeTab::News => "News",
            HomeTab::Community => "Community",
            HomeTab::Activity => "Activity",
            HomeTab::Progress => "Progress",
            HomeTab::Profile => "Profile",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Clone, Debug, Default)]
pub struct HomeTabs {
    selected: HomeTab,
}

impl HomeTabs {
    pub fn selected(&self) -> HomeTab {
        self.selected
    }

    /// Out-of-range indices keep the current tab.
    pub fn select_index(&mut self, index: usize) -> HomeTab {
        if let Some(tab) = HomeTab::from_index(index) {
            self.selected = tab;
        }
        self.selected
    }

    pub fn select(&mut self, tab: HomeTab) {
        self.selected = tab;
    }
}

pub const ONBOARDING_PAGES: [&str; 4] = [
    "Welcome to",
    "Start Your Journey Towards A More Active Lifestyle",
    "An App For The Whole Family",
    "No Matter Your Age, Challenge Yourself",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OnboardingStep {
    Page(usize),
    Finished,
}

#[derive(Clone, Debug, Default)]
pub struct Onboarding {
    index: usize,
}

impl Onboarding {
    pub fn current(&self) -> OnboardingStep {
        if self.index < ONBOARDING_PAGES.len() {
            OnboardingStep::Page(self.index)
        } else {
            OnboardingStep::Finished
        }
    }

    pub fn title(&self) -> Option<&'static str> {
        ONBOARDING_PAGES.get(self.index).copied()
    }

    /// Skip is offered from the second page onwards.
    pub fn can_skip(&self) -> bool {
        self.index > 0 && self.index < ONBOARDING_PAGES.len()
    }

    pub fn is_last_page(&self) -> bool {
        self.index + 1 == ONBOARDING_PAGES.len()
    }

    pub fn next(&mut self) -> OnboardingStep {
        if self.index < ONBOARDING_PAGES.len() {
            self.index += 1;
        }
        self.current()
    }

    pub fn skip(&mut self) -> OnboardingStep {
        if self.can_skip() {
            self.index = ONBOARDING_PAGES.len();
        }
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_by_index() {
        let mut tabs = HomeTabs::default();
        assert_eq!(tabs.selected(), HomeTab::News);
        assert_eq!(tabs.select_index(2), HomeTab::Activity);
        assert_eq!(tabs.select_index(9), HomeTab::Activity);
        assert_eq!(HomeTab::Profile.index(), 4);
        assert_eq!(HomeTab::Progress.label(), "Progress");
    }

    #[test]
    fn onboarding_walks_pages() {
        let mut o = Onboarding::default();
        assert!(!o.can_skip());
        assert_eq!(o.skip(), OnboardingStep::Page(0));
        assert_eq!(o.next(), OnboardingStep::Page(1));
        assert!(o.can_skip());
        o.next();
        o.next();
        assert!(o.is_last_page());
        assert_eq!(o.next(), OnboardingStep::Finished);
        assert_eq!(o.next(), OnboardingStep::Finished);
        assert!(o.title().is_none());
    }

    #[test]
    fn skip_finishes() {
        let mut o = Onboarding::default();
        o.next();
        assert_eq!(o.skip(), OnboardingStep::Finished);
    }
}
