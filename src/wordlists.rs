// Static term lists. Stages take their lists as kwargs and fall back to these.

/// Known automated accounts, matched case-insensitively against the whole author name
pub const BOT_NAMES: &[&str] = &[
    "AutoModerator",
    "RemindMeBot",
    "GoodBot_BadBot",
    "TrollaBot",
    "Mentioned_Videos",
    "gifReversingBot",
    "image_linker_bot",
    "xkcd_transcriber",
    "DeepLinkBot",
    "stabbot",
    "transcribersofreddit",
    "haikubot-test",
    "Shakespeare-Bot",
    "timezone_bot",
    "Lyrics-Bot",
    "WikiTextBot",
    "fact_bot",
    "Bot_Metric",
    "TheDailyShowBot",
    "TweetPoster",
    "Imaginative_Bot",
    "Sub_Stats_Bot",
    "LinkFixerBot",
    "SmallSubBot",
    "Magic_Eye_Bot",
];

/// Text cell values that mark removed or deleted content
pub const REMOVED_MARKERS: &[&str] = &["[removed]", "[deleted]"];

/// Topical allowlist for parenting-related content
pub const PARENTING_KEYWORDS: &[&str] = &[
    "parenting", "parent", "child", "children", "kid", "kids", "baby", "babies", "toddler",
    "toddlers", "teen", "teens", "mother", "father", "mom", "dad", "family", "guardian",
    "upbringing", "raising", "education", "school", "daycare", "nursery", "diaper",
    "feeding", "sleep training", "discipline", "emotional support", "development",
    "milestone", "playdate", "sibling", "newborn", "infant", "adolescent", "co-parenting",
    "step-parent", "foster parent", "grandparent", "caregiver", "childcare",
    "homeschooling", "potty training", "bedtime", "allowance", "chores", "playtime",
    "story time", "pacifier", "stroller", "car seat", "crib", "high chair", "baby food",
    "formula", "breastfeeding", "weaning", "tantrum", "puberty", "adolescence", "teenager",
    "empty nest", "college fund", "curfew", "responsibility", "guidance", "support",
    "understanding", "love", "patience", "empathy", "communication", "boundaries",
    "routine", "schedule", "nurturing", "bonding", "attachment", "positive reinforcement",
    "consequences", "role model", "developmental stages", "learning", "growth",
    "well-being", "health", "safety", "nutrition", "immunization", "pediatrician", "doctor",
    "therapy", "counseling", "mental health", "physical health", "emotional health",
    "behavior", "temperament", "personality", "identity", "self-esteem", "confidence",
    "resilience", "coping skills", "problem-solving", "decision-making", "independence",
    "autonomy", "social skills", "friendship", "bullying", "peer pressure", "online safety",
    "screen time", "digital citizenship", "values", "morals", "ethics", "faith", "culture",
    "traditions", "heritage", "celebrations", "rituals", "family time", "quality time",
    "vacation", "travel", "adventure", "exploration", "discovery", "creativity",
    "imagination", "art", "music", "sports", "hobbies", "interests", "passion", "purpose",
    "future", "dreams", "goals", "aspirations", "success", "happiness", "joy",
    "fulfillment", "meaning", "legacy", "generation", "ancestors", "descendants", "lineage",
    "roots", "history", "hope", "connection", "belonging", "community", "support system",
    "village", "tribe", "network", "resources", "mentorship", "inspiration", "motivation",
    "encouragement", "praise", "recognition", "appreciation", "gratitude", "thankfulness",
    "kindness", "compassion", "generosity", "sharing", "cooperation", "teamwork",
    "collaboration", "respect", "tolerance", "acceptance", "inclusion", "diversity",
    "equality", "justice", "fairness", "peace", "harmony", "balance", "wholeness",
    "completeness", "unity", "togetherness", "oneness", "interconnectedness",
    "universal love",
];
