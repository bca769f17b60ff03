//! Static page copy.
//!
//! Everything here is a whole-lifetime constant.  Media are opaque
//! references; nothing in the crate ever opens them.

/// Opaque reference to an image or video asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaRef(pub &'static str);

/// One stage of the mapping pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub id: u8,
    pub title: &'static str,
    pub description: &'static str,
}

/// One instrument in the technology showcase.
#[derive(Debug, Clone, Copy)]
pub struct TechItem {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub image: MediaRef,
    pub alt_text: &'static str,
}

/// One organisation card.
#[derive(Debug, Clone, Copy)]
pub struct OrgCard {
    pub id: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

// ───────────────────────────────────────── hero ──────────────

pub const HERO_VIDEO: MediaRef = MediaRef("/img/tipografia.mp4");

pub const HERO_HEADLINE: &[&str] = &[
    "A Ciência por Trás da Cartografia das",
    "Profundezas: Como Decodificamos o",
    "Território Mais Secreto do Planeta",
];

pub const HERO_LEAD: &str = "A partir desse eco, modelos matemáticos reconstroem montanhas, \
falhas e vales submersos com detalhes impressionantes. A sensação é de desvendar um novo \
planeta aqui na Terra, um fascínio que torna essa ciência irresistível a todos.";

// ───────────────────────────────────────── steps ─────────────

pub const STEPS_TITLE: &str = "Análise de dados do oceano.";

pub const STEPS_INTRO: &str = "Para mapear o oceano, os sistemas adotam uma progressão \
rigorosa capaz de transformar o tempo de retorno do eco em dados topográficos. Veja as \
quatro etapas que possibilitam a visualização do fundo do mar";

pub const MAPPING_STEPS: &[Step] = &[
    Step {
        id: 0,
        title: "Aquisição de Dados",
        description: "O sonar emite ondas sonoras que atingem o fundo do mar e retornam, \
registrando profundidade e formato do terreno.",
    },
    Step {
        id: 1,
        title: "Processamento e Correções",
        description: "Os dados brutos passam por limpeza, remoção de ruídos e ajustes \
relacionados ao movimento da embarcação, garantindo maior precisão.",
    },
    Step {
        id: 2,
        title: "Modelagem Digital",
        description: "As medições processadas são transformadas em um modelo 3D que \
representa fielmente as estruturas do fundo oceânico.",
    },
    Step {
        id: 3,
        title: "Visualização e Interpretação",
        description: "O modelo gerado é convertido em mapas e visualizações interativas \
que facilitam a análise do terreno.",
    },
];

// ───────────────────────────────────────── technology ────────

pub const TECH_TITLE: &str = "Cartografia das Profundezas";

pub const TECH_INTRO: &str = "Abaixo estão os instrumentos responsáveis por revelar a \
arquitetura invisível do oceano, tecnologias que transformam pressão, escuridão e silêncio \
em dados científicos de alta resolução. Toque para explorar.";

pub const TECHNOLOGIES: &[TechItem] = &[
    TechItem {
        id: "ROVs",
        name: "ROVs/AUVs (Veículos Submarinos)",
        description: "Exploram zonas abissais inacessíveis ao ser humano, registrando \
imagens em alta precisão e coletando dados estruturais do ambiente.",
        image: MediaRef("assets/ROVs.webp"),
        alt_text: "Veículo Submarino Autônomo",
    },
    TechItem {
        id: "SONAR",
        name: "Sonar Multifeixe",
        description: "Emite feixes acústicos que modelam o relevo submarino em três \
dimensões, permitindo análises batimétricas de alta resolução.",
        image: MediaRef("assets/sonar.png"),
        alt_text: "Sonar Multifeixe",
    },
    TechItem {
        id: "SIDESCAN",
        name: "Sonar de Varredura Lateral",
        description: "Produz imagens acústicas detalhadas que revelam texturas, naufrágios \
e padrões sedimentares ao longo do fundo marinho.",
        image: MediaRef("assets/side-sonar.png"),
        alt_text: "Side Scan Sonar",
    },
    TechItem {
        id: "SAMPLERS",
        name: "Coletores de Amostras (Samplers)",
        description: "Capturam sedimentos, organismos e minerais das camadas profundas, \
permitindo análises geoquímicas e biológicas.",
        image: MediaRef("assets/Samplers.jpg"),
        alt_text: "Equipamento de coleta",
    },
];

// ───────────────────────────────────────── environment ───────

pub const ENV_TITLE: &str = "Ciência Ambiental";

pub const ENV_INTRO: &str = "O mapeamento e a pesquisa das profundezas oceânicas são \
essenciais para a preservação. Dados batimétricos e descobertas científicas orientam ONGs \
na criação de áreas protegidas, no combate à pesca ilegal e no desenvolvimento de políticas \
públicas eficazes.";

pub const ORG_CARDS: &[OrgCard] = &[
    OrgCard {
        id: "oceana",
        icon: "⚖",
        title: "Oceana",
        description: "Focada em reformas políticas globais e advocacy baseado em evidências \
científicas. Utiliza dados para apoiar leis que protegem os oceanos, combatendo a \
sobrepesca e a poluição.",
    },
    OrgCard {
        id: "sea-shepherd",
        icon: "⚓",
        title: "Sea Shepherd",
        description: "Executa missões de ação direta e não violenta para proteger a vida \
marinha. Suas campanhas combatem a pesca predatória, caça ilegal e crimes ambientais.",
    },
    OrgCard {
        id: "tamar",
        icon: "🐢",
        title: "Projeto TAMAR",
        description: "Referência nacional em conservação. Realiza pesquisa científica, \
monitoramento de desovas e educação ambiental para preservar as espécies de tartarugas \
marinhas no Brasil.",
    },
    OrgCard {
        id: "argo",
        icon: "🦈",
        title: "Programa Argo",
        description: "Especializado em monitoramento oceanográfico avançado, utilizando \
sensores e tecnologia para entender mudanças climáticas e proteger ecossistemas marinhos.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    /// `true` when no two ids in `ids` are equal.
    fn ids_unique<T: PartialEq>(ids: impl IntoIterator<Item = T>) -> bool {
        let ids: Vec<T> = ids.into_iter().collect();
        ids.iter()
            .enumerate()
            .all(|(i, a)| ids[i + 1..].iter().all(|b| a != b))
    }

    #[test]
    fn ids_are_unique_within_each_array() {
        assert!(ids_unique(MAPPING_STEPS.iter().map(|s| s.id)));
        assert!(ids_unique(TECHNOLOGIES.iter().map(|t| t.id)));
        assert!(ids_unique(ORG_CARDS.iter().map(|c| c.id)));
    }

    #[test]
    fn ids_unique_detects_duplicates() {
        assert!(!ids_unique(["a", "b", "a"]));
        assert!(ids_unique(Vec::<u8>::new()));
    }

    #[test]
    fn four_of_each() {
        assert_eq!(MAPPING_STEPS.len(), 4);
        assert_eq!(TECHNOLOGIES.len(), 4);
        assert_eq!(ORG_CARDS.len(), 4);
    }
}
