//! Seed corpus for initial knowledge store population

use crate::search::NewDocument;

/// Seed question/answer pair
pub struct SeedDocument {
    pub question: &'static str,
    pub answer: &'static str,
}

/// Default corpus, inserted in this order (ids 0..10)
pub const SEED_DOCUMENTS: &[SeedDocument] = &[
    SeedDocument {
        question: "What is sexual wellness?",
        answer: "Sexual wellness refers to a state of physical, emotional, mental, and social well-being in relation to sexuality. It encompasses a positive and respectful approach to sexuality and sexual relationships, as well as the possibility of having pleasurable and safe sexual experiences, free of coercion, discrimination, and violence.",
    },
    SeedDocument {
        question: "How can I improve my sexual health?",
        answer: "Improving sexual health involves regular check-ups with healthcare providers, practicing safe sex, maintaining open communication with partners, understanding consent, managing stress, maintaining overall physical health through exercise and nutrition, and seeking professional help when needed for sexual concerns.",
    },
    SeedDocument {
        question: "What are common sexual health concerns?",
        answer: "Common sexual health concerns include sexually transmitted infections (STIs), erectile dysfunction, premature ejaculation, low libido, painful intercourse, fertility issues, menopause-related changes, and psychological factors affecting sexual performance or satisfaction.",
    },
    SeedDocument {
        question: "How can I practice safer sex?",
        answer: "Safer sex practices include using barriers like condoms or dental dams correctly and consistently, getting regular STI testing, limiting sexual partners, communicating openly about sexual health status, and avoiding sexual activity when you or your partner has symptoms of an STI.",
    },
    SeedDocument {
        question: "What is consent in sexual relationships?",
        answer: "Consent is a clear, enthusiastic, and ongoing agreement to engage in sexual activity. It must be freely given without pressure, manipulation, or impairment. Consent can be withdrawn at any time, and previous consent doesn't imply future consent. Effective consent requires open communication and respect for boundaries.",
    },
    SeedDocument {
        question: "How can I improve communication with my partner about sex?",
        answer: "Improving sexual communication involves choosing the right time and place for discussions, using 'I' statements to express feelings, being specific about desires and boundaries, listening actively without judgment, starting with positive feedback, and considering professional help like sex therapy if needed.",
    },
    SeedDocument {
        question: "What are common myths about sex?",
        answer: "Common sex myths include: sex always decreases in long-term relationships, men always want sex more than women, orgasm should always happen during intercourse, size matters most for satisfaction, and that good sex should be spontaneous rather than planned. These myths can create unrealistic expectations and pressure.",
    },
    SeedDocument {
        question: "How does aging affect sexual health?",
        answer: "Aging can bring changes like decreased hormone levels, longer arousal time, changes in erectile function, vaginal dryness, and shifts in desire. However, many people maintain satisfying sex lives throughout older age by adapting to these changes, using lubricants, focusing on intimacy beyond intercourse, and maintaining open communication.",
    },
    SeedDocument {
        question: "What is the relationship between mental health and sexual health?",
        answer: "Mental health and sexual health are closely connected. Stress, anxiety, depression, and past trauma can affect desire, arousal, and satisfaction. Similarly, sexual problems can impact mental wellbeing. Addressing both aspects through therapy, stress management, and open communication is important for overall wellness.",
    },
    SeedDocument {
        question: "How can I maintain sexual wellness during pregnancy?",
        answer: "Sexual wellness during pregnancy involves adapting to physical changes, finding comfortable positions, communicating with partners about changing needs and desires, addressing concerns with healthcare providers, and understanding that desire may fluctuate throughout pregnancy. Unless medically advised otherwise, sex is generally safe during pregnancy.",
    },
];

/// Seed corpus as insertable documents
pub fn seed_documents() -> Vec<NewDocument> {
    SEED_DOCUMENTS
        .iter()
        .map(|seed| NewDocument::new(seed.question, seed.answer))
        .collect()
}
