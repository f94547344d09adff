//! Static lookup tables for topic, keyword and intent detection.
//!
//! Keys are lowercase so the "key occurs in normalised text" rule can fire
//! for every entry. Declaration order is irrelevant to callers because
//! extraction output is sorted.

/// Topic injected when nothing else matched but the text mentions a repository.
pub const REPOSITORY_FALLBACK_TOPIC: &str = "repository pattern";

/// Word that triggers [`REPOSITORY_FALLBACK_TOPIC`].
pub const REPOSITORY_TRIGGER: &str = "repository";

/// Phrases signalling a wish to swap one technology for another.
pub const REPLACE_MARKERS: &[&str] = &["prefer", "instead", "should use"];

/// Phrases signalling a pattern to stay away from.
pub const AVOID_MARKERS: &[&str] = &["avoid", "anti-pattern", "don't", "do not"];

/// Phrases signalling dependency injection.
pub const DI_MARKERS: &[&str] = &["inject", "di", "dependency injection"];

/// Canonical topic key → synonym phrases.
pub static SYNONYMS: &[(&str, &[&str])] = &[
    // Languages
    ("kotlin", &["kt", "kotlin lang", "kotlin language"]),
    ("java", &["java lang", "jdk", "jvm language"]),
    // Core / Android
    ("android", &["android sdk", "android os", "android platform"]),
    ("jetpack", &["androidx", "jetpack libraries"]),
    ("appcompat", &["androidx appcompat"]),
    ("lifecycle", &["androidx lifecycle", "livedata"]),
    ("viewmodel", &["androidx viewmodel", "vm"]),
    ("navigation", &["jetpack navigation", "nav component", "navigation component"]),
    ("workmanager", &["jetpack workmanager", "background work", "android work"]),
    ("room", &["jetpack room", "sqlite orm", "room db", "room database"]),
    ("datastore", &["jetpack datastore", "preferences datastore", "proto datastore"]),
    ("paging", &["paging3", "paging library", "jetpack paging"]),
    // UI
    ("compose", &["jetpack compose", "android compose", "compose ui", "compose toolkit"]),
    ("xml", &["android xml", "xml layout", "layout xml"]),
    ("constraintlayout", &["constraint layout"]),
    ("motionlayout", &["motion layout"]),
    ("material3", &["m3", "material you", "material design 3"]),
    ("glance", &["jetpack glance", "app widgets"]),
    ("wearos", &["wear os", "android wear", "wearable"]),
    ("tvos", &["android tv", "tv app"]),
    // Dependency injection
    ("hilt", &["dagger hilt", "android hilt"]),
    ("dagger", &["dagger2", "dagger 2", "dagger framework"]),
    ("koin", &["koin di", "koin framework"]),
    ("dependency injection", &["di", "injection"]),
    // Async / concurrency
    ("coroutines", &["coroutine", "kotlin coroutines", "kotlin coroutine"]),
    ("flow", &["kotlin flow", "stateflow", "sharedflow"]),
    ("rxjava", &["rx", "reactive java"]),
    ("rxkotlin", &["rx kotlin"]),
    // Networking
    ("retrofit", &["retrofit2", "retrofit 2"]),
    ("okhttp", &["okhttp3", "ok http", "okhttp 3"]),
    ("ktor", &["ktor client", "ktor server"]),
    ("volley", &["android volley"]),
    ("graphql", &["graph ql"]),
    ("apollo", &["apollo graphql"]),
    // Serialization
    ("moshi", &["moshi json", "square moshi"]),
    ("gson", &["google gson", "gson json"]),
    ("kotlinx-serialization", &["kotlin serialization", "kotlinx serialization"]),
    // Architecture patterns
    ("mvvm", &["model view viewmodel"]),
    ("mvi", &["model view intent"]),
    ("mvc", &["model view controller"]),
    ("clean-architecture", &["clean architecture"]),
    ("modularization", &["modular app", "multi module"]),
    // Testing
    ("junit", &["junit4", "junit5", "junit 4", "junit 5"]),
    ("espresso", &["android espresso", "ui espresso"]),
    ("robolectric", &["android robolectric"]),
    ("mockk", &["mock k", "mock kotlin"]),
    ("truth", &["google truth"]),
    ("turbine", &["flow testing", "turbine test"]),
    ("ui-automator", &["uiautomator", "ui automator"]),
    ("kaspresso", &["kaspresso ui test"]),
    ("kotest", &["kotlin test", "kotlin testing"]),
    // Build tools
    ("gradle", &["gradle build", "gradle android"]),
    ("ksp", &["kotlin symbol processing"]),
    ("kapt", &["kotlin annotation processing"]),
    ("bazel", &["bazel build"]),
    // Analytics & monitoring
    ("firebase-analytics", &["firebase analytics"]),
    ("crashlytics", &["firebase crashlytics"]),
    ("datadog", &["datadog monitoring"]),
    ("newrelic", &["new relic"]),
    ("sentry", &["sentry logging"]),
    ("appcenter", &["microsoft appcenter"]),
    // Ads & monetization
    ("admob", &["google admob"]),
    ("facebook-ads", &["meta ads", "fb ads"]),
    ("applovin", &["app lovin"]),
    ("ironsource", &["iron source"]),
    // Push & messaging
    ("firebase-messaging", &["fcm", "firebase cloud messaging"]),
    ("onesignal", &["one signal"]),
    ("pubnub", &["pub nub"]),
    ("pusher", &["pusher channels"]),
    // Storage & database
    ("sqlite", &["sql lite"]),
    ("realm", &["realm db", "realm database"]),
    ("objectbox", &["object box"]),
    // Multimedia
    ("exoplayer", &["exo player"]),
    ("media3", &["androidx media3"]),
    ("ffmpeg", &["ffmpeg library"]),
    ("opengl", &["open gl", "open graphics library"]),
    ("sceneform", &["scene form"]),
    ("arcore", &["ar core"]),
    // Security
    ("keystore", &["android keystore", "keystore system"]),
    ("safetynet", &["safety net"]),
    ("playintegrity", &["play integrity api"]),
    ("proguard", &["pro guard"]),
    ("r8", &["android r8"]),
    // Cloud / backend
    ("firebase", &["firebase sdk", "firebase services"]),
    ("supabase", &["supabase backend"]),
    ("amplify", &["aws amplify"]),
    ("socketio", &["socket io"]),
    // DevOps / CI
    ("fastlane", &["fast lane"]),
    ("bitrise", &["bitrise ci"]),
    ("circleci", &["circle ci"]),
    ("github-actions", &["github actions"]),
    // Popular libraries
    ("glide", &["glide image loader"]),
    ("coil", &["coil image loader", "coil kt"]),
    ("picasso", &["picasso image loader"]),
    ("lottie", &["lottie animations", "airbnb lottie"]),
    ("timber", &["timber logging"]),
    ("shimmer", &["facebook shimmer"]),
    ("stetho", &["facebook stetho"]),
    ("leakcanary", &["leak canary", "square leakcanary"]),
];

/// Stack phrases collected verbatim as keywords.
pub static STACK_HINTS: &[&str] = &[
    // Core languages
    "kotlin", "java",
    // Android core & Jetpack
    "android", "jetpack", "appcompat", "androidx", "lifecycle", "viewmodel", "navigation",
    "workmanager", "room", "datastore", "paging", "camerax", "mlkit", "biometric", "slices",
    // UI
    "compose", "xml", "constraintlayout", "motionlayout", "material3", "glance", "wearos", "tvos",
    // Dependency injection
    "hilt", "dagger", "koin",
    // Async / concurrency
    "coroutines", "flow", "rxjava", "rxkotlin",
    // Networking
    "retrofit", "okhttp", "ktor", "volley", "graphql", "apollo",
    // Serialization
    "moshi", "gson", "kotlinx-serialization",
    // Architecture patterns
    "mvvm", "mvi", "mvc", "clean-architecture", "modularization",
    // Testing
    "junit", "espresso", "robolectric", "mockk", "truth", "turbine", "ui-automator", "kaspresso",
    "kotest",
    // Build tools
    "gradle", "ksp", "kapt", "bazel",
    // Analytics & monitoring
    "firebase-analytics", "crashlytics", "datadog", "newrelic", "sentry", "appcenter",
    // Ads & monetization
    "admob", "facebook-ads", "applovin", "ironsource",
    // Push & messaging
    "firebase-messaging", "onesignal", "pubnub", "pusher",
    // Storage & database
    "sqlite", "realm", "objectbox",
    // Multimedia
    "exoplayer", "media3", "ffmpeg", "opengl", "sceneform", "arcore",
    // Security
    "keystore", "safetynet", "playintegrity", "proguard", "r8",
    // Cloud / backend
    "firebase", "supabase", "amplify", "graphql", "socketio",
    // DevOps & CI
    "fastlane", "bitrise", "circleci", "github-actions",
    // Other popular libraries
    "glide", "coil", "picasso", "lottie", "timber", "dagger2", "shimmer", "stetho", "leakcanary",
];
