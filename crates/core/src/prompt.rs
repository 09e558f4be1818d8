use crate::models::{Interest, ItineraryRequest, Region};

pub const AGENCY_NAME: &str = "Nerza Agency";

/// Interests that make the Tafraout campsite worth recommending.
const CAMPSITE_TRIGGERS: [Interest; 3] = [
    Interest::BivouacNights,
    Interest::BerberCulture,
    Interest::AdventureAdrenaline,
];

pub fn build_tagline_prompt() -> String {
    format!(
        "Écris une seule phrase d'accroche (moins de 15 mots) pour \"{AGENCY_NAME}\", agence de voyage \
         lifestyle et premium au Maroc qui s'adresse aux jeunes adultes. Ton inspirant et immersif, \
         qui donne envie de vivre le Maroc autrement : pense \"expérience\", \"vibration\", \
         \"authentique\". Réponds uniquement avec la phrase, sans guillemets ni préfixe."
    )
}

pub fn build_itinerary_prompt(request: &ItineraryRequest) -> String {
    let region_focus = region_focus(request.region, &request.interests);
    let interest_focus = interest_focus(&request.interests);

    format!(
        "Tu es \"Nerza\", conseiller voyage haut de gamme de {AGENCY_NAME}, spécialiste de la région \
         d'Agadir au Maroc. Rédige un itinéraire personnalisé, jour par jour, pour un séjour de {days} jours.\n\
         \n\
         Préférences du voyageur :\n\
         - Budget : \"{budget}\"\n\
         \n\
         **Consignes :**\n\
         1. **Région :** {region_focus}\n\
         2. **Centres d'intérêt :** {interest_focus}\n\
         3. **Programme :** pour chaque jour, détaille le matin, l'après-midi et la soirée avec des idées hors des sentiers battus.\n\
         4. **Lieux réels :** cite uniquement des restaurants, sites, hôtels et riads qui existent et sont vérifiables ; n'invente aucun nom.\n\
         5. **Ton :** engageant, inspirant et premium, fidèle à l'image de {AGENCY_NAME}.\n\
         6. **Format :** titres Markdown de la forme `### Jour 1: Titre`, sous-parties `**Matin :**`, `**Après-midi :**`, `**Soir :**`, et noms de lieux importants entre doubles astérisques (**). N'utilise aucun autre balisage.\n\
         7. **Prix :** ne mentionne AUCUN prix ni montant ; le tarif est calculé séparément par notre système.\n\
         8. **Transfert aéroport :** indique dès le Jour 1 que le transfert privé depuis l'aéroport d'Agadir Al Massira (AGA) jusqu'à l'hébergement est inclus et organisé par {AGENCY_NAME}.\n\
         9. **Inclusions :** précise que les repas et boissons restent à la charge du voyageur ; le forfait comprend l'hébergement, le transport et les activités prévues.\n\
         \n\
         Commence directement par le Jour 1, sans introduction ni conclusion.",
        days = request.duration_days,
        budget = request.budget.label(),
    )
}

fn region_focus(region: Region, interests: &[Interest]) -> String {
    match region {
        Region::Agadir => "reste exclusivement sur Agadir et ses environs immédiats, Taghazout compris pour le \
             surf et les sports nautiques. Le voyageur veut rester sur la côte."
            .to_string(),
        Region::Region => {
            let mut focus = "construis un itinéraire d'aventure et de découverte dans l'arrière-pays \
                 (Tafraout, Tiznit, montagnes de l'Anti-Atlas). Le voyageur veut explicitement sortir \
                 d'Agadir."
                .to_string();
            if suggests_campsite(interests) {
                focus.push_str(
                    " Recommande le \"Camping Tazka\" à Tafraout pour les nuits en pleine nature.",
                );
            } else {
                focus.push_str(
                    " Si une nuit en bivouac ou une immersion berbère s'y prête, le \"Camping Tazka\" \
                     à Tafraout est une excellente option.",
                );
            }
            focus
        }
    }
}

fn suggests_campsite(interests: &[Interest]) -> bool {
    interests
        .iter()
        .any(|interest| CAMPSITE_TRIGGERS.contains(interest))
}

fn interest_focus(interests: &[Interest]) -> String {
    if interests.is_empty() {
        return "aucun centre d'intérêt précisé. Propose un itinéraire équilibré et emblématique de la \
                région choisie (balnéaire chic, sports nautiques et gastronomie pour Agadir ; trekking, \
                aventure et culture berbère pour l'arrière-pays)."
            .to_string();
    }

    let labels = interests
        .iter()
        .map(|interest| interest.label())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{labels}. Sers-t'en comme fil conducteur de tes suggestions.")
}
