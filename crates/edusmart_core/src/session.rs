//! crates/edusmart_core/src/session.rs
//!
//! The navigation/session state machine. A `Session` is the single source of
//! truth for "what is visible now": the authentication phase, the active
//! section, the selection context the next detail screen needs, and the
//! ephemeral results handed from a completion event to its result screen.
//!
//! All transitions are synchronous and run to completion; the session is
//! driven by one event at a time and performs no I/O.

use crate::domain::{
    Course, Discussion, FlashcardTally, Lesson, LessonKind, ProfileUpdate, StudyGroup,
    UserProfile, VocabularyEntry,
};

//=========================================================================================
// Authentication Phase
//=========================================================================================

/// The unauthenticated-flow state. Exactly one phase is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    Splash,
    Welcome,
    Login,
    Register,
    ForgotPassword,
    Authenticated,
}

/// Events that drive the `AuthPhase` machine. `SplashTimeout` is the only
/// non-user-triggered event; it is fired once by the splash timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SplashTimeout,
    GetStarted,
    SubmitLogin,
    SubmitRegister,
    GoToRegister,
    GoToLogin,
    GoToForgotPassword,
    BackToLogin,
    Logout,
}

//=========================================================================================
// Sections
//=========================================================================================

/// The currently visible authenticated-app screen. The set is flat; every
/// transition is an explicit event carrying the target section and, where
/// applicable, the entity to store in the selection context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Home,
    Explore,
    AiTutor,
    Profile,
    EditProfile,
    Settings,
    Certificates,
    CertificateDetail,
    Bookmarks,
    OfflineLibrary,
    DailyChallenge,
    ChallengeExercise,
    Subscription,
    HelpCenter,
    ContactSupport,
    UserProfileView,
    CourseDetail,
    Curriculum,
    LessonPlayer,
    Search,
    Notifications,
    Exercise,
    ExerciseResult,
    Vocabulary,
    VocabularyDetail,
    Flashcards,
    FlashcardResult,
    FlashcardDecks,
    Progress,
    Achievements,
    Leaderboard,
    Discussions,
    DiscussionDetail,
    CreateDiscussion,
    StudyGroups,
    GroupDetail,
    CreateGroup,
}

/// The sections that suppress the persistent header and bottom navigation.
///
/// Kept as an explicit table rather than a derived property so the
/// membership can be audited screen by screen.
pub const CHROME_HIDDEN: &[Section] = &[
    Section::CourseDetail,
    Section::Curriculum,
    Section::LessonPlayer,
    Section::Search,
    Section::Notifications,
    Section::Exercise,
    Section::ExerciseResult,
    Section::VocabularyDetail,
    Section::Flashcards,
    Section::FlashcardResult,
    Section::FlashcardDecks,
    Section::Achievements,
    Section::Leaderboard,
    Section::DiscussionDetail,
    Section::CreateDiscussion,
    Section::GroupDetail,
    Section::CreateGroup,
    Section::EditProfile,
];

//=========================================================================================
// Navigation Events
//=========================================================================================

/// A tagged navigation event. Selection events carry the entity the target
/// detail screen must render, so the selection reference is populated in the
/// same transition that changes the section.
#[derive(Debug, Clone)]
pub enum NavEvent {
    /// Plain navigation, including every back edge.
    Go(Section),
    SelectCourse(Course),
    /// From the course detail screen; the selected course is unchanged.
    Enroll,
    /// Routes to the exercise screen for quiz lessons, else the player.
    SelectLesson(Lesson),
    SelectVocabulary(VocabularyEntry),
    SelectDiscussion(Discussion),
    SelectGroup(StudyGroup),
    /// Stores the score (0-100) and shows the result screen.
    CompleteExercise(u8),
    /// Returns to the exercise without clearing the previous score.
    RetryExercise,
    CompleteFlashcards(FlashcardTally),
    /// Merges the partial edit into the profile, then returns to it.
    SaveProfile(ProfileUpdate),
}

//=========================================================================================
// Views
//=========================================================================================

/// What the presentation layer should render. Detail variants borrow their
/// selection, so a rendered detail screen always has its entity. `Empty` is
/// the defensive no-render used when a detail section is somehow reached
/// without its selection.
#[derive(Debug)]
pub enum View<'a> {
    Splash,
    Welcome,
    Login,
    Register,
    ForgotPassword,
    Home,
    Explore,
    AiTutor,
    Profile(&'a UserProfile),
    EditProfile(&'a UserProfile),
    Search,
    Notifications,
    CourseDetail(&'a Course),
    Curriculum(&'a Course),
    LessonPlayer(&'a Course),
    Exercise,
    ExerciseResult { score: u8 },
    Vocabulary(&'a [VocabularyEntry]),
    VocabularyDetail(&'a VocabularyEntry),
    FlashcardDecks,
    Flashcards(&'a [VocabularyEntry]),
    FlashcardResult { tally: FlashcardTally },
    Progress,
    Achievements,
    Leaderboard,
    Discussions,
    DiscussionDetail(&'a Discussion),
    CreateDiscussion,
    StudyGroups,
    GroupDetail(&'a StudyGroup),
    CreateGroup,
    Empty,
}

//=========================================================================================
// Session
//=========================================================================================

/// The application session. Owned by the top-level shell; all mutation goes
/// through `handle_auth`, `dispatch` and the named vocabulary/profile
/// operations.
#[derive(Debug, Clone)]
pub struct Session {
    auth: AuthPhase,
    section: Section,
    selected_course: Option<Course>,
    selected_vocab: Option<VocabularyEntry>,
    selected_discussion: Option<Discussion>,
    selected_group: Option<StudyGroup>,
    last_score: u8,
    last_tally: FlashcardTally,
    profile: UserProfile,
    vocabulary: Vec<VocabularyEntry>,
}

impl Session {
    /// Creates a fresh session at the splash screen.
    pub fn new(profile: UserProfile, vocabulary: Vec<VocabularyEntry>) -> Self {
        Self {
            auth: AuthPhase::Splash,
            section: Section::Home,
            selected_course: None,
            selected_vocab: None,
            selected_discussion: None,
            selected_group: None,
            last_score: 0,
            last_tally: FlashcardTally::default(),
            profile,
            vocabulary,
        }
    }

    // --- Read accessors -----------------------------------------------------------------

    pub fn auth_phase(&self) -> AuthPhase {
        self.auth
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn vocabulary(&self) -> &[VocabularyEntry] {
        &self.vocabulary
    }

    pub fn selected_course(&self) -> Option<&Course> {
        self.selected_course.as_ref()
    }

    pub fn selected_vocabulary(&self) -> Option<&VocabularyEntry> {
        self.selected_vocab.as_ref()
    }

    pub fn selected_discussion(&self) -> Option<&Discussion> {
        self.selected_discussion.as_ref()
    }

    pub fn selected_group(&self) -> Option<&StudyGroup> {
        self.selected_group.as_ref()
    }

    pub fn last_score(&self) -> u8 {
        self.last_score
    }

    pub fn last_tally(&self) -> FlashcardTally {
        self.last_tally
    }

    // --- Authentication machine ---------------------------------------------------------

    /// Applies one auth event. Any (phase, event) pair without a documented
    /// edge leaves the phase unchanged.
    pub fn handle_auth(&mut self, event: AuthEvent) {
        use AuthEvent::*;
        use AuthPhase::*;

        self.auth = match (self.auth, event) {
            (Splash, SplashTimeout) => Welcome,
            (Welcome, GetStarted) => Login,
            (Login, SubmitLogin) => Authenticated,
            (Login, GoToRegister) => Register,
            (Login, GoToForgotPassword) => ForgotPassword,
            (Register, SubmitRegister) => Authenticated,
            (Register, GoToLogin) => Login,
            (ForgotPassword, BackToLogin) => Login,
            // Logout re-enters the unauthenticated flow at login, not splash.
            (Authenticated, Logout) => Login,
            (phase, _) => phase,
        };
    }

    // --- Navigation machine -------------------------------------------------------------

    /// Applies one navigation event. Ignored unless authenticated; section
    /// state only has meaning inside the app shell.
    pub fn dispatch(&mut self, event: NavEvent) {
        if self.auth != AuthPhase::Authenticated {
            return;
        }

        match event {
            NavEvent::Go(section) => self.section = section,
            NavEvent::SelectCourse(course) => {
                self.selected_course = Some(course);
                self.section = Section::CourseDetail;
            }
            NavEvent::Enroll => self.section = Section::Curriculum,
            NavEvent::SelectLesson(lesson) => {
                self.section = if lesson.kind == LessonKind::Quiz {
                    Section::Exercise
                } else {
                    Section::LessonPlayer
                };
            }
            NavEvent::SelectVocabulary(entry) => {
                self.selected_vocab = Some(entry);
                self.section = Section::VocabularyDetail;
            }
            NavEvent::SelectDiscussion(discussion) => {
                self.selected_discussion = Some(discussion);
                self.section = Section::DiscussionDetail;
            }
            NavEvent::SelectGroup(group) => {
                self.selected_group = Some(group);
                self.section = Section::GroupDetail;
            }
            NavEvent::CompleteExercise(score) => {
                self.last_score = score;
                self.section = Section::ExerciseResult;
            }
            NavEvent::RetryExercise => self.section = Section::Exercise,
            NavEvent::CompleteFlashcards(tally) => {
                self.last_tally = tally;
                self.section = Section::FlashcardResult;
            }
            NavEvent::SaveProfile(update) => {
                self.profile.apply(update);
                self.section = Section::Profile;
            }
        }
    }

    // --- Vocabulary toggles -------------------------------------------------------------

    /// Flips `is_learned` on the entry with the given id, leaving every
    /// other entry and field unchanged. Unknown ids are ignored.
    pub fn toggle_learned(&mut self, id: &str) {
        if let Some(entry) = self.vocabulary.iter_mut().find(|v| v.id == id) {
            entry.is_learned = !entry.is_learned;
        }
    }

    /// Flips `is_bookmarked` on the entry with the given id.
    pub fn toggle_bookmarked(&mut self, id: &str) {
        if let Some(entry) = self.vocabulary.iter_mut().find(|v| v.id == id) {
            entry.is_bookmarked = !entry.is_bookmarked;
        }
    }

    // --- Rendering contract -------------------------------------------------------------

    /// Whether the persistent header/bottom-navigation chrome is shown for
    /// the current section. Unauthenticated screens never show chrome.
    pub fn chrome_visible(&self) -> bool {
        self.auth == AuthPhase::Authenticated && !CHROME_HIDDEN.contains(&self.section)
    }

    /// Resolves the current state to the view the shell should render.
    ///
    /// Detail sections with a missing selection resolve to `View::Empty`
    /// rather than panicking; sections without a dedicated screen resolve to
    /// the home view.
    pub fn view(&self) -> View<'_> {
        match self.auth {
            AuthPhase::Splash => return View::Splash,
            AuthPhase::Welcome => return View::Welcome,
            AuthPhase::Login => return View::Login,
            AuthPhase::Register => return View::Register,
            AuthPhase::ForgotPassword => return View::ForgotPassword,
            AuthPhase::Authenticated => {}
        }

        match self.section {
            Section::Home => View::Home,
            Section::Explore => View::Explore,
            Section::AiTutor => View::AiTutor,
            Section::Profile => View::Profile(&self.profile),
            Section::EditProfile => View::EditProfile(&self.profile),
            Section::Search => View::Search,
            Section::Notifications => View::Notifications,
            Section::CourseDetail => match &self.selected_course {
                Some(course) => View::CourseDetail(course),
                None => View::Empty,
            },
            Section::Curriculum => match &self.selected_course {
                Some(course) => View::Curriculum(course),
                None => View::Empty,
            },
            Section::LessonPlayer => match &self.selected_course {
                Some(course) => View::LessonPlayer(course),
                None => View::Empty,
            },
            Section::Exercise => View::Exercise,
            Section::ExerciseResult => View::ExerciseResult {
                score: self.last_score,
            },
            Section::Vocabulary => View::Vocabulary(&self.vocabulary),
            Section::VocabularyDetail => match &self.selected_vocab {
                Some(entry) => View::VocabularyDetail(entry),
                None => View::Empty,
            },
            Section::FlashcardDecks => View::FlashcardDecks,
            Section::Flashcards => View::Flashcards(&self.vocabulary),
            Section::FlashcardResult => View::FlashcardResult {
                tally: self.last_tally,
            },
            Section::Progress => View::Progress,
            Section::Achievements => View::Achievements,
            Section::Leaderboard => View::Leaderboard,
            Section::Discussions => View::Discussions,
            Section::DiscussionDetail => match &self.selected_discussion {
                Some(discussion) => View::DiscussionDetail(discussion),
                None => View::Empty,
            },
            Section::CreateDiscussion => View::CreateDiscussion,
            Section::StudyGroups => View::StudyGroups,
            Section::GroupDetail => match &self.selected_group {
                Some(group) => View::GroupDetail(group),
                None => View::Empty,
            },
            Section::CreateGroup => View::CreateGroup,
            // Secondary screens without a dedicated view render the home
            // dashboard, the same fallback the app uses for any section it
            // does not recognize.
            Section::Settings
            | Section::Certificates
            | Section::CertificateDetail
            | Section::Bookmarks
            | Section::OfflineLibrary
            | Section::DailyChallenge
            | Section::ChallengeExercise
            | Section::Subscription
            | Section::HelpCenter
            | Section::ContactSupport
            | Section::UserProfileView => View::Home,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    const ALL_PHASES: [AuthPhase; 6] = [
        AuthPhase::Splash,
        AuthPhase::Welcome,
        AuthPhase::Login,
        AuthPhase::Register,
        AuthPhase::ForgotPassword,
        AuthPhase::Authenticated,
    ];

    const ALL_AUTH_EVENTS: [AuthEvent; 9] = [
        AuthEvent::SplashTimeout,
        AuthEvent::GetStarted,
        AuthEvent::SubmitLogin,
        AuthEvent::SubmitRegister,
        AuthEvent::GoToRegister,
        AuthEvent::GoToLogin,
        AuthEvent::GoToForgotPassword,
        AuthEvent::BackToLogin,
        AuthEvent::Logout,
    ];

    /// The documented auth edges, used to sweep every (phase, event) pair.
    fn documented_edge(phase: AuthPhase, event: AuthEvent) -> Option<AuthPhase> {
        use AuthEvent::*;
        use AuthPhase::*;
        match (phase, event) {
            (Splash, SplashTimeout) => Some(Welcome),
            (Welcome, GetStarted) => Some(Login),
            (Login, SubmitLogin) => Some(Authenticated),
            (Login, GoToRegister) => Some(Register),
            (Login, GoToForgotPassword) => Some(ForgotPassword),
            (Register, SubmitRegister) => Some(Authenticated),
            (Register, GoToLogin) => Some(Login),
            (ForgotPassword, BackToLogin) => Some(Login),
            (Authenticated, Logout) => Some(Login),
            _ => None,
        }
    }

    fn vocab(id: &str, word: &str) -> VocabularyEntry {
        VocabularyEntry {
            id: id.to_string(),
            word: word.to_string(),
            phonetic: String::new(),
            definition: String::new(),
            example: String::new(),
            category: "UI/UX Design".to_string(),
            difficulty: Difficulty::Medium,
            is_bookmarked: false,
            is_learned: false,
        }
    }

    fn session() -> Session {
        Session::new(
            UserProfile {
                name: "Quoc Anh".to_string(),
                avatar: "avatar-1".to_string(),
                level: 12,
                xp: 2450,
            },
            vec![vocab("v1", "Hierarchy"), vocab("v2", "Affordance")],
        )
    }

    fn authed_session() -> Session {
        let mut s = session();
        s.handle_auth(AuthEvent::SplashTimeout);
        s.handle_auth(AuthEvent::GetStarted);
        s.handle_auth(AuthEvent::SubmitLogin);
        s
    }

    fn session_at(phase: AuthPhase) -> Session {
        // Drive the machine along documented edges to reach the phase.
        let mut s = session();
        let path: &[AuthEvent] = match phase {
            AuthPhase::Splash => &[],
            AuthPhase::Welcome => &[AuthEvent::SplashTimeout],
            AuthPhase::Login => &[AuthEvent::SplashTimeout, AuthEvent::GetStarted],
            AuthPhase::Register => &[
                AuthEvent::SplashTimeout,
                AuthEvent::GetStarted,
                AuthEvent::GoToRegister,
            ],
            AuthPhase::ForgotPassword => &[
                AuthEvent::SplashTimeout,
                AuthEvent::GetStarted,
                AuthEvent::GoToForgotPassword,
            ],
            AuthPhase::Authenticated => &[
                AuthEvent::SplashTimeout,
                AuthEvent::GetStarted,
                AuthEvent::SubmitLogin,
            ],
        };
        for &e in path {
            s.handle_auth(e);
        }
        assert_eq!(s.auth_phase(), phase);
        s
    }

    #[test]
    fn every_undocumented_auth_pair_leaves_phase_unchanged() {
        for phase in ALL_PHASES {
            for event in ALL_AUTH_EVENTS {
                let mut s = session_at(phase);
                s.handle_auth(event);
                let expected = documented_edge(phase, event).unwrap_or(phase);
                assert_eq!(
                    s.auth_phase(),
                    expected,
                    "({phase:?}, {event:?}) transitioned unexpectedly"
                );
            }
        }
    }

    #[test]
    fn logout_returns_to_login_not_splash() {
        let mut s = authed_session();
        s.handle_auth(AuthEvent::Logout);
        assert_eq!(s.auth_phase(), AuthPhase::Login);
    }

    #[test]
    fn navigation_is_ignored_before_authentication() {
        let mut s = session();
        s.dispatch(NavEvent::Go(Section::Discussions));
        assert_eq!(s.section(), Section::Home);
    }

    #[test]
    fn selecting_a_lesson_routes_quizzes_to_the_exercise_screen() {
        let quiz = Lesson {
            id: "l1".to_string(),
            title: "Checkpoint quiz".to_string(),
            duration: "10m".to_string(),
            kind: LessonKind::Quiz,
            is_locked: false,
            is_completed: false,
        };
        let video = Lesson {
            kind: LessonKind::Video,
            ..quiz.clone()
        };

        let mut s = authed_session();
        s.dispatch(NavEvent::SelectLesson(quiz));
        assert_eq!(s.section(), Section::Exercise);

        let mut s = authed_session();
        s.dispatch(NavEvent::SelectLesson(video));
        assert_eq!(s.section(), Section::LessonPlayer);
    }

    #[test]
    fn toggling_learned_twice_restores_the_entry_and_touches_nothing_else() {
        let mut s = authed_session();
        let before = s.vocabulary().to_vec();

        s.toggle_learned("v1");
        assert!(s.vocabulary()[0].is_learned);
        assert_eq!(s.vocabulary()[1], before[1]);

        s.toggle_learned("v1");
        assert_eq!(s.vocabulary(), &before[..]);
    }

    #[test]
    fn toggling_bookmark_twice_restores_the_entry() {
        let mut s = authed_session();
        let before = s.vocabulary().to_vec();
        s.toggle_bookmarked("v2");
        assert!(s.vocabulary()[1].is_bookmarked);
        s.toggle_bookmarked("v2");
        assert_eq!(s.vocabulary(), &before[..]);
    }

    #[test]
    fn toggling_an_unknown_id_changes_nothing() {
        let mut s = authed_session();
        let before = s.vocabulary().to_vec();
        s.toggle_learned("missing");
        assert_eq!(s.vocabulary(), &before[..]);
    }

    #[test]
    fn retry_keeps_the_previous_score() {
        let mut s = authed_session();
        s.dispatch(NavEvent::CompleteExercise(85));
        assert_eq!(s.section(), Section::ExerciseResult);
        assert_eq!(s.last_score(), 85);

        s.dispatch(NavEvent::RetryExercise);
        assert_eq!(s.section(), Section::Exercise);
        assert_eq!(s.last_score(), 85);

        s.dispatch(NavEvent::CompleteExercise(92));
        assert_eq!(s.last_score(), 92);
    }

    #[test]
    fn save_profile_merges_and_returns_to_profile() {
        let mut s = authed_session();
        s.dispatch(NavEvent::Go(Section::EditProfile));
        s.dispatch(NavEvent::SaveProfile(ProfileUpdate {
            name: Some("Minh".to_string()),
            ..Default::default()
        }));
        assert_eq!(s.section(), Section::Profile);
        assert_eq!(s.profile().name, "Minh");
        assert_eq!(s.profile().xp, 2450);
    }

    #[test]
    fn chrome_table_matches_the_documented_membership() {
        let mut s = authed_session();
        assert!(s.chrome_visible());

        s.dispatch(NavEvent::Go(Section::StudyGroups));
        assert!(s.chrome_visible());

        s.dispatch(NavEvent::Go(Section::Search));
        assert!(!s.chrome_visible());

        s.dispatch(NavEvent::Go(Section::EditProfile));
        assert!(!s.chrome_visible());
    }

    #[test]
    fn chrome_is_never_shown_while_unauthenticated() {
        let s = session();
        assert!(!s.chrome_visible());
    }

    #[test]
    fn secondary_sections_fall_back_to_the_home_view() {
        let mut s = authed_session();
        s.dispatch(NavEvent::Go(Section::Settings));
        assert!(matches!(s.view(), View::Home));

        s.dispatch(NavEvent::Go(Section::OfflineLibrary));
        assert!(matches!(s.view(), View::Home));
    }

    #[test]
    fn unauthenticated_phases_render_their_auth_views() {
        let s = session();
        assert!(matches!(s.view(), View::Splash));

        let s = session_at(AuthPhase::ForgotPassword);
        assert!(matches!(s.view(), View::ForgotPassword));
    }
}
