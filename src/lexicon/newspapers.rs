// Source names exactly as they appear in the Infomedia exports. Matching is
// exact, so qualified variants such as "(Abonnementsområde)" are listed
// separately.

pub const DEFAULT_LEFT: &[&str] = &[
    "Politiken",
    "Politiken (Abonnementsområde)",
    "Politiken Weekly",
    "politiken.dk",
    "Information",
    "Dagbladet Information",
    "information.dk",
    "Arbejderen",
    "Dagbladet Arbejderen",
    "Ekstra Bladet",
    "Ekstra Bladet (Abonnementsområde)",
    "ekstrabladet.dk",
    "Ugebrevet A4",
    "Avisen.dk",
];

pub const DEFAULT_RIGHT: &[&str] = &[
    "Berlingske",
    "Berlingske Tidende",
    "Berlingske (Abonnementsområde)",
    "berlingske.dk",
    "Jyllands-Posten",
    "Morgenavisen Jyllands-Posten",
    "Jyllands-Posten (Abonnementsområde)",
    "jyllands-posten.dk",
    "Weekendavisen",
    "B.T.",
    "bt.dk",
    "Børsen",
    "borsen.dk",
    "Finans",
    "finans.dk",
    "Kristeligt Dagblad",
    "k.dk",
];
