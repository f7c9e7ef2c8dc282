pub struct Icons;

impl Icons {
    pub const ROCKET: &str = "🚀";
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const STATS: &str = "📊";
    pub const LINK: &str = "🔗";
    pub const PACKAGE: &str = "📦";
    pub const DATABASE: &str = "🗄️";
    pub const DEL: &str = "🗑️";
    pub const STAR: &str = "⭐";
    pub const ATOM: &str = "⚛️";
    pub const PUZZLE: &str = "🧩";
    pub const LAYOUT: &str = "🧱";
}
