//! Localized small-talk variant tables. Each family exposes the variants for
//! one language; selection picks a uniformly random index. The matches are
//! exhaustive over [`LanguageCode`], so adding a language without filling in
//! every family refuses to compile. Greeting and identity variants all embed
//! the fixed self-identification "AI Compass Assistant"; the brand stays
//! untranslated.

use crate::language::LanguageCode;

pub fn greeting_variants(lang: LanguageCode) -> &'static [&'static str] {
    match lang {
        LanguageCode::En => &[
            "Hi there! I'm the AI Compass Assistant.",
            "Hello! The AI Compass Assistant here, ready to help.",
            "Hey! I'm the AI Compass Assistant — let's find you the right tool.",
        ],
        LanguageCode::Fr => &[
            "Bonjour ! Je suis l'AI Compass Assistant.",
            "Salut ! Ici l'AI Compass Assistant, ravi de vous aider.",
        ],
        LanguageCode::Es => &[
            "¡Hola! Soy el AI Compass Assistant.",
            "¡Buenas! Aquí el AI Compass Assistant, listo para ayudarte.",
        ],
        LanguageCode::De => &[
            "Hallo! Ich bin der AI Compass Assistant.",
            "Guten Tag! Hier ist der AI Compass Assistant, ich helfe gerne weiter.",
        ],
        LanguageCode::Pt => &[
            "Olá! Eu sou o AI Compass Assistant.",
            "Oi! Aqui é o AI Compass Assistant, pronto para ajudar.",
        ],
        LanguageCode::Zh => &[
            "你好！我是 AI Compass Assistant。",
            "您好！AI Compass Assistant 为您服务。",
        ],
        LanguageCode::Ja => &[
            "こんにちは！AI Compass Assistant です。",
            "はじめまして、AI Compass Assistant と申します。",
        ],
        LanguageCode::Vi => &[
            "Xin chào! Tôi là AI Compass Assistant.",
            "Chào bạn! AI Compass Assistant đây, rất vui được giúp bạn.",
        ],
    }
}

pub fn how_are_you_variants(lang: LanguageCode) -> &'static [&'static str] {
    match lang {
        LanguageCode::En => &[
            "Doing great and ready to dig through the catalog — how can I help?",
            "All systems go! What can I find for you today?",
        ],
        LanguageCode::Fr => &[
            "Très bien, merci ! Comment puis-je vous aider ?",
            "En pleine forme — que puis-je chercher pour vous ?",
        ],
        LanguageCode::Es => &[
            "¡Muy bien, gracias! ¿En qué puedo ayudarte?",
            "¡De maravilla! ¿Qué necesitas hoy?",
        ],
        LanguageCode::De => &[
            "Mir geht es gut, danke! Wie kann ich helfen?",
            "Bestens! Was darf ich für Sie suchen?",
        ],
        LanguageCode::Pt => &[
            "Estou ótimo, obrigado! Como posso ajudar?",
            "Tudo certo por aqui — o que você precisa?",
        ],
        LanguageCode::Zh => &[
            "我很好，谢谢！有什么可以帮您？",
            "状态很好！今天需要找什么工具？",
        ],
        LanguageCode::Ja => &[
            "元気です、ありがとうございます！何かお探しですか？",
            "絶好調です！今日は何をお手伝いしましょうか？",
        ],
        LanguageCode::Vi => &[
            "Tôi khỏe, cảm ơn bạn! Tôi có thể giúp gì?",
            "Rất tốt! Hôm nay bạn cần tìm gì?",
        ],
    }
}

pub fn identity_variants(lang: LanguageCode) -> &'static [&'static str] {
    match lang {
        LanguageCode::En => &[
            "I'm the AI Compass Assistant — I help you navigate Sanofi's internal AI tool catalog.",
            "The AI Compass Assistant: your guide to the approved AI tools at Sanofi.",
        ],
        LanguageCode::Fr => &[
            "Je suis l'AI Compass Assistant — votre guide du catalogue d'outils IA de Sanofi.",
            "L'AI Compass Assistant, à votre service pour explorer le catalogue d'outils.",
        ],
        LanguageCode::Es => &[
            "Soy el AI Compass Assistant: tu guía del catálogo interno de herramientas de IA.",
            "El AI Compass Assistant, aquí para orientarte entre las herramientas aprobadas.",
        ],
        LanguageCode::De => &[
            "Ich bin der AI Compass Assistant — Ihr Wegweiser durch den internen KI-Werkzeugkatalog.",
            "Der AI Compass Assistant: ich kenne den Katalog und finde das passende Werkzeug.",
        ],
        LanguageCode::Pt => &[
            "Sou o AI Compass Assistant — seu guia pelo catálogo interno de ferramentas de IA.",
            "O AI Compass Assistant, aqui para navegar o catálogo com você.",
        ],
        LanguageCode::Zh => &[
            "我是 AI Compass Assistant，帮您在内部 AI 工具目录中找到方向。",
            "AI Compass Assistant——赛诺菲内部 AI 工具目录的向导。",
        ],
        LanguageCode::Ja => &[
            "私は AI Compass Assistant。社内 AI ツールカタログの案内役です。",
            "AI Compass Assistant です。カタログから最適なツールを見つけます。",
        ],
        LanguageCode::Vi => &[
            "Tôi là AI Compass Assistant — người dẫn đường trong danh mục công cụ AI nội bộ.",
            "AI Compass Assistant, sẵn sàng giúp bạn khám phá danh mục công cụ.",
        ],
    }
}

pub fn who_built_variants(lang: LanguageCode) -> &'static [&'static str] {
    match lang {
        LanguageCode::En => &[
            "The AI Compass team in Sanofi Digital built me — engineers and designers who keep the tool catalog honest.",
            "I come from the AI Compass team at Sanofi Digital. They review my answers and read your feedback.",
        ],
        LanguageCode::Fr => &[
            "J'ai été créé par l'équipe AI Compass de Sanofi Digital.",
            "L'équipe AI Compass, chez Sanofi Digital, m'a conçu et m'entretient.",
        ],
        LanguageCode::Es => &[
            "Me creó el equipo de AI Compass en Sanofi Digital.",
            "Soy obra del equipo AI Compass de Sanofi Digital.",
        ],
        LanguageCode::De => &[
            "Mich hat das AI-Compass-Team bei Sanofi Digital gebaut.",
            "Das AI-Compass-Team von Sanofi Digital hat mich entwickelt und pflegt mich.",
        ],
        LanguageCode::Pt => &[
            "Fui criado pela equipe do AI Compass na Sanofi Digital.",
            "A equipe do AI Compass, na Sanofi Digital, me construiu.",
        ],
        LanguageCode::Zh => &[
            "我由 Sanofi Digital 的 AI Compass 团队打造。",
            "是 Sanofi Digital 的 AI Compass 团队开发了我。",
        ],
        LanguageCode::Ja => &[
            "Sanofi Digital の AI Compass チームが私を作りました。",
            "私は Sanofi Digital の AI Compass チームによって開発されました。",
        ],
        LanguageCode::Vi => &[
            "Tôi được đội AI Compass tại Sanofi Digital xây dựng.",
            "Đội AI Compass ở Sanofi Digital đã tạo ra tôi.",
        ],
    }
}

pub fn help_variants(lang: LanguageCode) -> &'static [&'static str] {
    match lang {
        LanguageCode::En => &[
            "Sure — tell me your team or the task, and I'll suggest tools, compare them, or pull up details.",
            "Happy to help! Ask me to recommend a tool, compare two, or translate a phrase.",
        ],
        LanguageCode::Fr => &[
            "Avec plaisir ! Demandez-moi de recommander un outil, d'en comparer deux ou de traduire une phrase.",
            "Bien sûr — dites-moi votre équipe ou votre tâche et je trouve l'outil qui convient.",
        ],
        LanguageCode::Es => &[
            "¡Claro! Pídeme recomendar una herramienta, comparar dos o traducir una frase.",
            "Con gusto — dime tu equipo o tu tarea y busco la herramienta adecuada.",
        ],
        LanguageCode::De => &[
            "Gerne! Ich kann Werkzeuge empfehlen, zwei vergleichen oder eine Phrase übersetzen.",
            "Natürlich — nennen Sie mir Team oder Aufgabe, ich finde das passende Werkzeug.",
        ],
        LanguageCode::Pt => &[
            "Claro! Peça uma recomendação, uma comparação ou uma tradução.",
            "Com prazer — me diga sua equipe ou tarefa e eu encontro a ferramenta certa.",
        ],
        LanguageCode::Zh => &[
            "当然可以！推荐工具、对比工具、翻译短语都可以找我。",
            "没问题——告诉我您的团队或任务，我来找合适的工具。",
        ],
        LanguageCode::Ja => &[
            "もちろんです！ツールの推薦、比較、フレーズの翻訳、何でもどうぞ。",
            "お任せください。チームやタスクを教えていただければ、最適なツールを探します。",
        ],
        LanguageCode::Vi => &[
            "Được chứ! Hãy nhờ tôi gợi ý công cụ, so sánh hai công cụ, hoặc dịch một cụm từ.",
            "Sẵn lòng — cho tôi biết nhóm hoặc công việc của bạn, tôi sẽ tìm công cụ phù hợp.",
        ],
    }
}

pub fn thanks_variants(lang: LanguageCode) -> &'static [&'static str] {
    match lang {
        LanguageCode::En => &[
            "You're welcome!",
            "Any time — that's what I'm here for.",
            "Glad it helped!",
        ],
        LanguageCode::Fr => &["Avec plaisir !", "De rien, n'hésitez pas à revenir."],
        LanguageCode::Es => &["¡De nada!", "¡Un placer, aquí estoy cuando quieras!"],
        LanguageCode::De => &["Gern geschehen!", "Immer gerne — bis zum nächsten Mal."],
        LanguageCode::Pt => &["De nada!", "Disponha, estou por aqui!"],
        LanguageCode::Zh => &["不客气！", "不用谢，随时找我。"],
        LanguageCode::Ja => &["どういたしまして！", "お役に立てて嬉しいです。"],
        LanguageCode::Vi => &["Không có gì!", "Rất vui được giúp bạn."],
    }
}

pub fn goodbye_variants(lang: LanguageCode) -> &'static [&'static str] {
    match lang {
        LanguageCode::En => &[
            "Goodbye! Come back whenever you need a tool.",
            "See you next time!",
        ],
        LanguageCode::Fr => &["Au revoir ! À bientôt.", "Bonne journée, à la prochaine !"],
        LanguageCode::Es => &[
            "¡Adiós! Vuelve cuando necesites una herramienta.",
            "¡Hasta la próxima!",
        ],
        LanguageCode::De => &[
            "Auf Wiedersehen! Bis zum nächsten Mal.",
            "Tschüss, kommen Sie gerne wieder.",
        ],
        LanguageCode::Pt => &[
            "Tchau! Volte quando precisar de uma ferramenta.",
            "Até a próxima!",
        ],
        LanguageCode::Zh => &["再见！需要工具随时回来。", "下次见！"],
        LanguageCode::Ja => &["さようなら！また必要なときにどうぞ。", "また次回お会いしましょう！"],
        LanguageCode::Vi => &[
            "Tạm biệt! Khi nào cần công cụ cứ quay lại nhé.",
            "Hẹn gặp lại!",
        ],
    }
}

pub fn acknowledgment_variants(lang: LanguageCode) -> &'static [&'static str] {
    match lang {
        LanguageCode::En => &[
            "👍 Anything else I can dig up?",
            "Got it. I'm here if you need more.",
            "Noted!",
        ],
        LanguageCode::Fr => &["Entendu ! Autre chose ?", "C'est noté."],
        LanguageCode::Es => &["¡Entendido! ¿Algo más?", "Anotado."],
        LanguageCode::De => &["Verstanden! Sonst noch etwas?", "Alles klar."],
        LanguageCode::Pt => &["Entendido! Mais alguma coisa?", "Anotado."],
        LanguageCode::Zh => &["明白了！还有别的吗？", "好的。"],
        LanguageCode::Ja => &["了解です！他に何かありますか？", "かしこまりました。"],
        LanguageCode::Vi => &["Đã hiểu! Bạn cần gì thêm không?", "Được rồi."],
    }
}

/// One-line capability summary appended to greetings.
pub fn capability_summary(lang: LanguageCode) -> &'static str {
    match lang {
        LanguageCode::En => "I can recommend tools from the catalog, compare them side by side, translate common phrases, and answer questions about Sanofi and AI Compass.",
        LanguageCode::Fr => "Je peux recommander des outils du catalogue, les comparer, traduire des phrases courantes et répondre aux questions sur Sanofi et AI Compass.",
        LanguageCode::Es => "Puedo recomendar herramientas del catálogo, compararlas, traducir frases comunes y responder preguntas sobre Sanofi y AI Compass.",
        LanguageCode::De => "Ich kann Werkzeuge aus dem Katalog empfehlen, sie vergleichen, gängige Phrasen übersetzen und Fragen zu Sanofi und AI Compass beantworten.",
        LanguageCode::Pt => "Posso recomendar ferramentas do catálogo, compará-las, traduzir frases comuns e responder perguntas sobre a Sanofi e o AI Compass.",
        LanguageCode::Zh => "我可以推荐目录中的工具、进行对比、翻译常用短语，并回答关于赛诺菲和 AI Compass 的问题。",
        LanguageCode::Ja => "カタログのツール推薦、比較、よく使うフレーズの翻訳、Sanofi と AI Compass に関する質問への回答ができます。",
        LanguageCode::Vi => "Tôi có thể gợi ý công cụ trong danh mục, so sánh chúng, dịch các cụm từ thông dụng và trả lời câu hỏi về Sanofi và AI Compass.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthesis::knowledge::SELF_IDENTIFICATION;

    #[test]
    fn every_language_has_variants_in_every_family() {
        for lang in LanguageCode::ALL {
            assert!(!greeting_variants(lang).is_empty());
            assert!(!how_are_you_variants(lang).is_empty());
            assert!(!identity_variants(lang).is_empty());
            assert!(!who_built_variants(lang).is_empty());
            assert!(!help_variants(lang).is_empty());
            assert!(!thanks_variants(lang).is_empty());
            assert!(!goodbye_variants(lang).is_empty());
            assert!(!acknowledgment_variants(lang).is_empty());
            assert!(!capability_summary(lang).is_empty());
        }
    }

    #[test]
    fn greetings_and_identity_always_carry_the_brand() {
        for lang in LanguageCode::ALL {
            for variant in greeting_variants(lang) {
                assert!(variant.contains(SELF_IDENTIFICATION), "{}", variant);
            }
            for variant in identity_variants(lang) {
                assert!(variant.contains(SELF_IDENTIFICATION), "{}", variant);
            }
        }
    }
}
