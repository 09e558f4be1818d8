//! Static content served when the generation backend is unavailable or gives up.

pub const FALLBACK_TAGLINE: &str = "Vibrez au rythme d'un Maroc secret et exaltant.";

pub const ABOUT_TEXT: &str = "Nous concevons des séjours sur-mesure, invitant jeunes adultes, \
couples et voyageurs internationaux à découvrir des facettes exclusives du pays. Accédez à des \
activités uniques, loin des sentiers battus, pour une immersion authentique et élégante.";

pub const FALLBACK_ITINERARY: &str = "### Jour 1: Arrivée et Ambiance Océane à Agadir

**Matin :** Accueil à l'aéroport d'Agadir Al Massira (AGA) par votre chauffeur Nerza Agency et transfert privé, inclus, jusqu'à votre hôtel. Une fois installé, flânez sur la corniche d'Agadir pour prendre le pouls de la ville.
**Après-midi :** Montée à la **Kasbah d'Agadir Oufella** et son panorama sur toute la baie, le meilleur spot photo de la ville.
**Soir :** Dîner (à votre charge) au restaurant **Le Flore**, sur le port de plaisance, pour ses fruits de mer dans un cadre chic et détendu.

### Jour 2: Cap sur Tafraout

**Matin :** Route vers Tafraout à travers les reliefs de l'Anti-Atlas, avec un arrêt devant le **Chapeau de Napoléon**.
**Après-midi :** Randonnée dans la **vallée des Ammeln** jusqu'aux **rochers peints** de Jean Vérame.
**Soir :** Dîner (à votre charge) et nuit dans une auberge de charme à Tafraout, sous un ciel étoilé exceptionnel.

### Jour 3: Tiznit et retour

**Matin :** Direction Tiznit, la cité d'argent : remparts historiques et **souk des bijoutiers**.
**Après-midi :** Déjeuner (à votre charge) au **Riad Le Lieu**, puis retour par la côte avec une halte sur la plage sauvage de **Mirleft**.
**Soir :** Coucher de soleil au **So Lounge Agadir**, rooftop face à l'océan, pour clore le séjour.
";
