//! UI strings and preset themes.
//!
//! Only the presentation layer translates. The state machine reports errors
//! as keys and never produces user-facing text itself.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
    Es,
}

impl Language {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "pt" | "pt-br" => Some(Language::Pt),
            "en" | "en-us" => Some(Language::En),
            "es" | "es-es" => Some(Language::Es),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
            Language::Es => "es",
        }
    }

    pub fn locale(&self) -> &'static str {
        match self {
            Language::Pt => "pt-BR",
            Language::En => "en-US",
            Language::Es => "es-ES",
        }
    }
}

/// Looks up a UI string and fills in `{{param}}` placeholders
pub trait Translator {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String;

    fn t(&self, key: &str) -> String {
        self.translate(key, &[])
    }
}

/// Built-in string table for one language
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    language: Language,
}

impl Catalog {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    fn strings(&self) -> &'static [(&'static str, &'static str)] {
        match self.language {
            Language::Pt => PT,
            Language::En => EN,
            Language::Es => ES,
        }
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let raw = self
            .strings()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(key);
        interpolate(raw, params)
    }
}

/// Replace `{{name}}` with the matching param; unknown names become empty
pub fn interpolate(template: &str, params: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end)
                if end > 0
                    && after[..end]
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                let name = &after[..end];
                if let Some((_, value)) = params.iter().find(|(k, _)| *k == name) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            _ => {
                out.push_str("{{");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Themes offered on the configuration screen and drawn from at random
pub fn preset_themes(language: Language) -> Vec<String> {
    let themes: &[&str] = match language {
        Language::Pt => &[
            "Profissões",
            "Animais",
            "Filmes",
            "Países",
            "Comidas",
            "Esportes",
            "Marcas",
            "Celebridades",
            "Instrumentos Musicais",
            "Planetas",
        ],
        Language::En => &[
            "Professions",
            "Animals",
            "Movies",
            "Countries",
            "Foods",
            "Sports",
            "Brands",
            "Celebrities",
            "Musical Instruments",
            "Planets",
        ],
        Language::Es => &[
            "Profesiones",
            "Animales",
            "Películas",
            "Países",
            "Comidas",
            "Deportes",
            "Marcas",
            "Celebridades",
            "Instrumentos Musicales",
            "Planetas",
        ],
    };
    themes.iter().map(|t| t.to_string()).collect()
}

const EN: &[(&str, &str)] = &[
    ("common.appTitle", "Who's the Impostor?"),
    ("common.footer", "Pass the phone. Trust no one."),
    ("common.unknownCommand", "Unknown command. Type 'help' to see what you can do here."),
    ("common.help", "Commands on this screen:"),
    ("common.bye", "Bye!"),
    ("lobby.heading", "Players"),
    ("lobby.subtitle", "Add at least {{min}} players to play."),
    ("lobby.emptyState", "No players yet."),
    ("lobby.commands", "add <name> | rm <number> | clear | next | quit"),
    ("lobby.classicCommands", "add <name> | rm <number> | clear | start | quit"),
    ("config.heading", "Round setup"),
    ("config.impostors", "Impostors: {{count}} (max {{max}})"),
    ("config.theme", "Theme: {{theme}}"),
    ("config.randomTheme", "Theme: random"),
    ("config.presets", "Preset themes:"),
    ("config.commands", "impostors <n> | theme <number or text> | random | start | lobby"),
    ("ready.heading", "Ready to start!"),
    ("ready.summary", "{{players}} players | {{impostors}} impostor(s)"),
    ("ready.instructions", "Everyone will see their role in secret, one at a time."),
    ("ready.commands", "ready | lobby"),
    ("reveal.stepOf", "Step {{current}} of {{total}}"),
    ("reveal.whoHasPhone", "Pass the phone to {{name}}"),
    ("reveal.tapToReveal", "{{name}}, type 'show' to see your role in secret."),
    ("reveal.impostor", "You are the IMPOSTOR!"),
    ("reveal.impostorHint", "You don't know the theme. Blend in and don't get caught."),
    ("reveal.themeIs", "The theme is: {{theme}}"),
    ("reveal.teamHint", "Find the impostor without giving the theme away."),
    ("reveal.nextPlayer", "Type 'next' and pass the phone on."),
    ("reveal.startGame", "Type 'next' to start the discussion."),
    ("reveal.commands", "show | next | lobby"),
    ("game.inProgress", "Discussion time"),
    ("game.instructions", "Take turns saying one word about the theme, then vote on who the impostor is."),
    ("game.whoWon", "Who won? Type 'crew' or 'impostor'."),
    ("game.commands", "crew | impostor | lobby"),
    ("results.impostorWins", "The impostor wins!"),
    ("results.teamWins", "The crew wins!"),
    ("results.impostorWinMsg", "The infiltrator fooled everyone."),
    ("results.teamWinMsg", "The impostor was unmasked."),
    ("results.themeWas", "The theme was: {{theme}}"),
    ("results.impostorWas", "Impostor(s): {{names}}"),
    ("results.commands", "again | lobby | quit"),
    ("error.emptyName", "The name cannot be empty."),
    ("error.notEnoughPlayers", "You need more players for that."),
    ("error.emptyTheme", "The theme cannot be empty."),
    ("error.noThemeAvailable", "Choose a theme first."),
    ("error.wrongPhase", "That can't be done on this screen."),
    ("error.notRevealed", "Type 'show' first so the player sees their role."),
    ("error.revealComplete", "Everyone has already seen their role."),
    ("error.notFound", "That player is no longer in the list."),
];

const PT: &[(&str, &str)] = &[
    ("common.appTitle", "Quem é o Impostor?"),
    ("common.footer", "Passe o celular. Não confie em ninguém."),
    ("common.unknownCommand", "Comando desconhecido. Digite 'help' para ver as opções."),
    ("common.help", "Comandos desta tela:"),
    ("common.bye", "Até mais!"),
    ("lobby.heading", "Jogadores"),
    ("lobby.subtitle", "Adicione pelo menos {{min}} jogadores para jogar."),
    ("lobby.emptyState", "Nenhum jogador ainda."),
    ("lobby.commands", "add <nome> | rm <número> | clear | next | quit"),
    ("lobby.classicCommands", "add <nome> | rm <número> | clear | start | quit"),
    ("config.heading", "Configuração"),
    ("config.impostors", "Impostores: {{count}} (máx. {{max}})"),
    ("config.theme", "Tema: {{theme}}"),
    ("config.randomTheme", "Tema: aleatório"),
    ("config.presets", "Temas prontos:"),
    ("config.commands", "impostors <n> | theme <número ou texto> | random | start | lobby"),
    ("ready.heading", "Pronto para começar!"),
    ("ready.summary", "{{players}} jogadores | {{impostors}} impostor(es)"),
    ("ready.instructions", "Cada um verá seu papel em segredo, um de cada vez."),
    ("ready.commands", "ready | lobby"),
    ("reveal.stepOf", "Passo {{current}} de {{total}}"),
    ("reveal.whoHasPhone", "Passe o celular para {{name}}"),
    ("reveal.tapToReveal", "{{name}}, digite 'show' para ver seu papel em segredo."),
    ("reveal.impostor", "Você é o IMPOSTOR!"),
    ("reveal.impostorHint", "Você não sabe o tema. Disfarce e não seja descoberto."),
    ("reveal.themeIs", "O tema é: {{theme}}"),
    ("reveal.teamHint", "Descubra o impostor sem entregar o tema."),
    ("reveal.nextPlayer", "Digite 'next' e passe o celular adiante."),
    ("reveal.startGame", "Digite 'next' para começar a discussão."),
    ("reveal.commands", "show | next | lobby"),
    ("game.inProgress", "Hora da discussão"),
    ("game.instructions", "Cada um diz uma palavra sobre o tema, depois votem em quem é o impostor."),
    ("game.whoWon", "Quem venceu? Digite 'crew' ou 'impostor'."),
    ("game.commands", "crew | impostor | lobby"),
    ("results.impostorWins", "Vitória do Impostor!"),
    ("results.teamWins", "Vitória do Time!"),
    ("results.impostorWinMsg", "O infiltrado enganou a todos!"),
    ("results.teamWinMsg", "O impostor foi desmascarado!"),
    ("results.themeWas", "O tema era: {{theme}}"),
    ("results.impostorWas", "Impostor(es): {{names}}"),
    ("results.commands", "again | lobby | quit"),
    ("error.emptyName", "O nome não pode ficar vazio."),
    ("error.notEnoughPlayers", "São necessários mais jogadores para isso."),
    ("error.emptyTheme", "O tema não pode ficar vazio."),
    ("error.noThemeAvailable", "Escolha um tema primeiro."),
    ("error.wrongPhase", "Isso não pode ser feito nesta tela."),
    ("error.notRevealed", "Digite 'show' primeiro para o jogador ver seu papel."),
    ("error.revealComplete", "Todos já viram seus papéis."),
    ("error.notFound", "Esse jogador não está mais na lista."),
];

const ES: &[(&str, &str)] = &[
    ("common.appTitle", "¿Quién es el Impostor?"),
    ("common.footer", "Pasa el móvil. No confíes en nadie."),
    ("common.unknownCommand", "Comando desconocido. Escribe 'help' para ver las opciones."),
    ("common.help", "Comandos de esta pantalla:"),
    ("common.bye", "¡Hasta luego!"),
    ("lobby.heading", "Jugadores"),
    ("lobby.subtitle", "Añade al menos {{min}} jugadores para jugar."),
    ("lobby.emptyState", "Todavía no hay jugadores."),
    ("lobby.commands", "add <nombre> | rm <número> | clear | next | quit"),
    ("lobby.classicCommands", "add <nombre> | rm <número> | clear | start | quit"),
    ("config.heading", "Configuración"),
    ("config.impostors", "Impostores: {{count}} (máx. {{max}})"),
    ("config.theme", "Tema: {{theme}}"),
    ("config.randomTheme", "Tema: aleatorio"),
    ("config.presets", "Temas predefinidos:"),
    ("config.commands", "impostors <n> | theme <número o texto> | random | start | lobby"),
    ("ready.heading", "¡Listos para empezar!"),
    ("ready.summary", "{{players}} jugadores | {{impostors}} impostor(es)"),
    ("ready.instructions", "Cada uno verá su papel en secreto, de uno en uno."),
    ("ready.commands", "ready | lobby"),
    ("reveal.stepOf", "Paso {{current}} de {{total}}"),
    ("reveal.whoHasPhone", "Pasa el móvil a {{name}}"),
    ("reveal.tapToReveal", "{{name}}, escribe 'show' para ver tu papel en secreto."),
    ("reveal.impostor", "¡Eres el IMPOSTOR!"),
    ("reveal.impostorHint", "No conoces el tema. Disimula y que no te descubran."),
    ("reveal.themeIs", "El tema es: {{theme}}"),
    ("reveal.teamHint", "Descubre al impostor sin revelar el tema."),
    ("reveal.nextPlayer", "Escribe 'next' y pasa el móvil."),
    ("reveal.startGame", "Escribe 'next' para empezar la discusión."),
    ("reveal.commands", "show | next | lobby"),
    ("game.inProgress", "Hora de debatir"),
    ("game.instructions", "Por turnos, decid una palabra sobre el tema y luego votad quién es el impostor."),
    ("game.whoWon", "¿Quién ganó? Escribe 'crew' o 'impostor'."),
    ("game.commands", "crew | impostor | lobby"),
    ("results.impostorWins", "¡Gana el Impostor!"),
    ("results.teamWins", "¡Gana el Equipo!"),
    ("results.impostorWinMsg", "¡El infiltrado engañó a todos!"),
    ("results.teamWinMsg", "¡El impostor fue desenmascarado!"),
    ("results.themeWas", "El tema era: {{theme}}"),
    ("results.impostorWas", "Impostor(es): {{names}}"),
    ("results.commands", "again | lobby | quit"),
    ("error.emptyName", "El nombre no puede estar vacío."),
    ("error.notEnoughPlayers", "Hacen falta más jugadores para eso."),
    ("error.emptyTheme", "El tema no puede estar vacío."),
    ("error.noThemeAvailable", "Elige un tema primero."),
    ("error.wrongPhase", "Eso no se puede hacer en esta pantalla."),
    ("error.notRevealed", "Escribe 'show' primero para que el jugador vea su papel."),
    ("error.revealComplete", "Todos ya vieron su papel."),
    ("error.notFound", "Ese jugador ya no está en la lista."),
];
